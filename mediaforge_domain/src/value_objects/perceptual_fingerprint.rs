// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Perceptual-similarity fingerprint: a rolling hash over a down-sampled
//! log-magnitude spectrogram, used only by the ML optimizer to
//! find *similar* prior jobs. Deliberately a distinct type from
//! [`super::MediaIdentity`] so it can never be passed where a cache key is
//! expected — see [`crate::services::cache_key_builder`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerceptualFingerprint(Vec<u32>);

impl PerceptualFingerprint {
    /// Builds a fingerprint from pre-computed log-magnitude spectrogram
    /// bins. The actual spectrogram computation is an ML-optimizer
    /// concern, out of scope here; this type only owns the rolling hash
    /// that turns bins into a comparable fingerprint.
    pub fn from_spectrogram_bins(bins: &[f32]) -> Self {
        let mut rolling = Vec::with_capacity(bins.len());
        let mut acc: u32 = 0x9E3779B9;
        for &bin in bins {
            let quantized = (bin.clamp(-1.0, 1.0) * i16::MAX as f32) as i32 as u32;
            acc = acc.rotate_left(5) ^ quantized;
            rolling.push(acc);
        }
        Self(rolling)
    }

    /// Hamming-style similarity in `[0.0, 1.0]`; `1.0` means identical
    /// fingerprints. Only meaningful between fingerprints of equal length.
    pub fn similarity(&self, other: &Self) -> f64 {
        if self.0.len() != other.0.len() || self.0.is_empty() {
            return 0.0;
        }
        let matching = self.0.iter().zip(other.0.iter()).filter(|(a, b)| a == b).count();
        matching as f64 / self.0.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_bins_are_fully_similar() {
        let bins = vec![0.1, 0.2, -0.3, 0.4];
        let a = PerceptualFingerprint::from_spectrogram_bins(&bins);
        let b = PerceptualFingerprint::from_spectrogram_bins(&bins);
        assert_eq!(a.similarity(&b), 1.0);
    }

    #[test]
    fn differing_length_fingerprints_are_not_comparable() {
        let a = PerceptualFingerprint::from_spectrogram_bins(&[0.1, 0.2]);
        let b = PerceptualFingerprint::from_spectrogram_bins(&[0.1, 0.2, 0.3]);
        assert_eq!(a.similarity(&b), 0.0);
    }
}
