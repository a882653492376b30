// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `media_processing`: full|clip with start/end timestamps.

use crate::error::MediaforgeError;
use serde::{Deserialize, Serialize};

/// Whether the demux stage processes the entire input or a clipped range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MediaProcessing {
    Full,
    Clip { start_ms: u64, end_ms: u64 },
}

impl MediaProcessing {
    /// Job-prep validation: a clip with `start_ms == end_ms` is an empty
    /// range and must be rejected with `config-missing`.
    pub fn clip(start_ms: u64, end_ms: u64) -> Result<Self, MediaforgeError> {
        if start_ms >= end_ms {
            return Err(MediaforgeError::ConfigMissing(format!(
                "clip range is empty: start_ms={} end_ms={}",
                start_ms, end_ms
            )));
        }
        Ok(MediaProcessing::Clip { start_ms, end_ms })
    }

    pub fn is_clip(&self) -> bool {
        matches!(self, MediaProcessing::Clip { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_clip_range() {
        assert!(MediaProcessing::clip(5_000, 5_000).is_err());
        assert!(MediaProcessing::clip(6_000, 5_000).is_err());
    }

    #[test]
    fn accepts_valid_clip_range() {
        let clip = MediaProcessing::clip(1_000, 2_000).unwrap();
        assert!(clip.is_clip());
    }
}
