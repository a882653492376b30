// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Thin domain-service wrapper over [`MediaIdentity::compute`] and
//! [`PerceptualFingerprint::from_spectrogram_bins`], so infrastructure
//! adapters depend on one call site rather than reaching into the value
//! objects directly. Keeping this as a service (rather than inlining the
//! calls at the demux adapter) gives the two fingerprint kinds one place
//! to be extended without touching call sites.

use crate::error::MediaforgeError;
use crate::value_objects::{MediaIdentity, PerceptualFingerprint};

pub struct FingerprintService;

impl FingerprintService {
    pub fn media_identity(samples: &[i16], duration_ms: u64) -> Result<MediaIdentity, MediaforgeError> {
        if duration_ms == 0 || samples.is_empty() {
            return Err(MediaforgeError::validation_error("cannot fingerprint zero-duration audio"));
        }
        Ok(MediaIdentity::compute(samples, duration_ms))
    }

    pub fn perceptual_fingerprint(spectrogram_bins: &[f32]) -> PerceptualFingerprint {
        PerceptualFingerprint::from_spectrogram_bins(spectrogram_bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_is_rejected() {
        let result = FingerprintService::media_identity(&[1, 2, 3], 0);
        assert!(result.is_err());
    }

    #[test]
    fn empty_samples_are_rejected() {
        let result = FingerprintService::media_identity(&[], 1000);
        assert!(result.is_err());
    }

    #[test]
    fn nonzero_duration_with_samples_succeeds() {
        let result = FingerprintService::media_identity(&[1, 2, 3, 4], 1000);
        assert!(result.is_ok());
    }
}
