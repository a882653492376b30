// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Media Identity Value Object
//!
//! Content fingerprint of a canonicalized (16 kHz mono PCM) audio stream.
//! This is the primary key for the cache subsystem, so it is deliberately
//! *not* derived from the file path or container metadata — only from the
//! decoded sample stream itself.
//!
//! The hashing algorithm lives here as a pure function over an in-memory
//! sample slice; the infrastructure layer (demux adapter) is responsible
//! for producing that canonical PCM stream (via an external demux tool)
//! and handing the samples to [`MediaIdentity::compute`]. Keeping the
//! algorithm itself free of I/O makes it directly unit-testable and
//! trivially benchmarkable.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Target size, in i16 samples, of the fingerprint's sampled input — chosen
/// so the total fingerprint input is approximately 1 MiB.
pub const FINGERPRINT_SAMPLE_BUDGET: usize = 512 * 1024; // 1 MiB / 2 bytes-per-sample

/// Number of evenly spaced interior windows sampled in addition to the
/// leading/trailing prefix and suffix.
pub const INTERIOR_WINDOW_COUNT: usize = 8;

/// SHA-256 content fingerprint of normalized 16 kHz mono PCM audio.
///
/// Computed exactly once per job from: exact duration in milliseconds,
/// the first N and last N samples, and M evenly
/// spaced interior windows, where `N` and `M` are chosen so the total
/// fingerprint input is approximately 1 MiB. The result is compared as a
/// full 32-byte SHA-256 digest, never truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaIdentity([u8; 32]);

impl MediaIdentity {
    /// Computes the fingerprint from a full 16 kHz mono PCM sample stream.
    ///
    /// `duration_ms` must be the exact decoded duration (milliseconds); it
    /// is hashed in alongside the sampled windows so that two streams with
    /// identical prefixes/suffixes/interiors but different lengths never
    /// collide. Zero-duration audio is rejected by the demux stage before
    /// this is ever called, not here — this is a pure mathematical
    /// function over whatever it is given.
    pub fn compute(samples: &[i16], duration_ms: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(duration_ms.to_be_bytes());

        let window = FINGERPRINT_SAMPLE_BUDGET / (INTERIOR_WINDOW_COUNT + 2);
        let window = window.max(1);

        for sample in Self::prefix(samples, window) {
            hasher.update(sample.to_be_bytes());
        }
        for sample in Self::suffix(samples, window) {
            hasher.update(sample.to_be_bytes());
        }
        for win_samples in Self::interior_windows(samples, window, INTERIOR_WINDOW_COUNT) {
            for sample in win_samples {
                hasher.update(sample.to_be_bytes());
            }
        }

        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    fn prefix(samples: &[i16], window: usize) -> &[i16] {
        &samples[..window.min(samples.len())]
    }

    fn suffix(samples: &[i16], window: usize) -> &[i16] {
        let len = samples.len();
        let start = len.saturating_sub(window);
        &samples[start..]
    }

    fn interior_windows(samples: &[i16], window: usize, count: usize) -> Vec<&[i16]> {
        if samples.len() <= window * 2 || count == 0 {
            return Vec::new();
        }
        let interior_len = samples.len() - window * 2;
        let step = interior_len / (count + 1);
        if step == 0 {
            return Vec::new();
        }
        (1..=count)
            .map(|i| {
                let start = window + step * i;
                let end = (start + window).min(samples.len());
                &samples[start..end]
            })
            .collect()
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, crate::error::MediaforgeError> {
        let bytes = hex::decode(s)
            .map_err(|e| crate::error::MediaforgeError::ValidationError(format!("invalid media identity hex: {}", e)))?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| crate::error::MediaforgeError::ValidationError("media identity must be 32 bytes".into()))?;
        Ok(Self(array))
    }
}

impl fmt::Display for MediaIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_samples(len: usize, seed: i16) -> Vec<i16> {
        (0..len).map(|i| ((i as i16).wrapping_mul(seed)) ^ seed).collect()
    }

    #[test]
    fn identical_streams_produce_identical_identity() {
        let samples = synthetic_samples(100_000, 7);
        let a = MediaIdentity::compute(&samples, 10_000);
        let b = MediaIdentity::compute(&samples, 10_000);
        assert_eq!(a, b);
    }

    #[test]
    fn differing_duration_changes_identity_even_with_same_samples() {
        let samples = synthetic_samples(100_000, 7);
        let a = MediaIdentity::compute(&samples, 10_000);
        let b = MediaIdentity::compute(&samples, 10_001);
        assert_ne!(a, b);
    }

    #[test]
    fn differing_interior_content_changes_identity() {
        let mut samples_a = synthetic_samples(200_000, 3);
        let samples_b = samples_a.clone();
        samples_a[100_000] = samples_a[100_000].wrapping_add(1);
        let identity_a = MediaIdentity::compute(&samples_a, 20_000);
        let identity_b = MediaIdentity::compute(&samples_b, 20_000);
        assert_ne!(identity_a, identity_b);
    }

    #[test]
    fn handles_short_streams_without_panicking() {
        let samples = synthetic_samples(10, 1);
        let identity = MediaIdentity::compute(&samples, 1);
        assert_eq!(identity.as_bytes().len(), 32);
    }

    #[test]
    fn hex_round_trips() {
        let samples = synthetic_samples(1_000, 5);
        let identity = MediaIdentity::compute(&samples, 100);
        let hex = identity.to_hex();
        assert_eq!(MediaIdentity::from_hex(&hex).unwrap(), identity);
    }
}
