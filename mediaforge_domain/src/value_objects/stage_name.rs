// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The thirteen pipeline stages, as a closed enum so stage sequencing,
//! cache-key construction, and the stage-adapter registry all share one
//! source of truth for names and ordinal position.

use crate::error::MediaforgeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Demux,
    MetadataEnrich,
    GlossaryLoad,
    SourceSeparate,
    VoiceActivityDiarize,
    Asr,
    Alignment,
    LyricsDetect,
    HallucinationRemove,
    Translate,
    SubtitleEncode,
    Mux,
    /// Final-artifact assembly for the transcribe/translate workflows:
    /// writes the transcript (and, for translate, the translated text)
    /// out as the job's delivered output.
    Export,
}

impl StageName {
    pub const ALL: [StageName; 13] = [
        StageName::Demux,
        StageName::MetadataEnrich,
        StageName::GlossaryLoad,
        StageName::SourceSeparate,
        StageName::VoiceActivityDiarize,
        StageName::Asr,
        StageName::Alignment,
        StageName::LyricsDetect,
        StageName::HallucinationRemove,
        StageName::Translate,
        StageName::SubtitleEncode,
        StageName::Mux,
        StageName::Export,
    ];

    /// Ordinal position in the canonical stage DAG, used for directory
    /// naming (`01_demux`, ..., `13_export`) and for the resume
    /// algorithm's "invalidate this and all downstream stages" rule.
    pub fn ordinal(&self) -> u8 {
        match self {
            StageName::Demux => 1,
            StageName::MetadataEnrich => 2,
            StageName::GlossaryLoad => 3,
            StageName::SourceSeparate => 4,
            StageName::VoiceActivityDiarize => 5,
            StageName::Asr => 6,
            StageName::Alignment => 7,
            StageName::LyricsDetect => 8,
            StageName::HallucinationRemove => 9,
            StageName::Translate => 10,
            StageName::SubtitleEncode => 11,
            StageName::Mux => 12,
            StageName::Export => 13,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Demux => "demux",
            StageName::MetadataEnrich => "metadata_enrich",
            StageName::GlossaryLoad => "glossary_load",
            StageName::SourceSeparate => "source_separate",
            StageName::VoiceActivityDiarize => "voice_activity_diarize",
            StageName::Asr => "asr",
            StageName::Alignment => "alignment",
            StageName::LyricsDetect => "lyrics_detect",
            StageName::HallucinationRemove => "hallucination_remove",
            StageName::Translate => "translate",
            StageName::SubtitleEncode => "subtitle_encode",
            StageName::Mux => "mux",
            StageName::Export => "export",
        }
    }

    /// Directory name under the job root, e.g. `06_asr`.
    pub fn dir_name(&self) -> String {
        format!("{:02}_{}", self.ordinal(), self.as_str())
    }

    /// Stages excluded from the cache subsystem: demux, mux, and
    /// job-specific output encoding (subtitle-encode is
    /// target-language-specific output, so it is excluded too).
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, StageName::Demux | StageName::Mux | StageName::SubtitleEncode)
    }

    /// Stages allowed to be `continue_on_failure` for graceful
    /// degradation: metadata enrichment, source separation, lyrics
    /// detection, and hallucination removal.
    pub fn supports_graceful_degradation(&self) -> bool {
        matches!(
            self,
            StageName::MetadataEnrich | StageName::SourceSeparate | StageName::LyricsDetect | StageName::HallucinationRemove
        )
    }
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StageName {
    type Err = MediaforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StageName::ALL
            .iter()
            .find(|stage| stage.as_str() == s)
            .copied()
            .ok_or_else(|| MediaforgeError::ValidationError(format!("unknown stage: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_sequential_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for (i, stage) in StageName::ALL.iter().enumerate() {
            assert_eq!(stage.ordinal() as usize, i + 1);
            assert!(seen.insert(stage.ordinal()));
        }
    }

    #[test]
    fn demux_and_mux_are_not_cacheable() {
        assert!(!StageName::Demux.is_cacheable());
        assert!(!StageName::Mux.is_cacheable());
        assert!(!StageName::SubtitleEncode.is_cacheable());
        assert!(StageName::Asr.is_cacheable());
    }

    #[test]
    fn dir_name_is_zero_padded() {
        assert_eq!(StageName::Demux.dir_name(), "01_demux");
        assert_eq!(StageName::Mux.dir_name(), "12_mux");
        assert_eq!(StageName::Export.dir_name(), "13_export");
    }

    #[test]
    fn export_is_cacheable() {
        assert!(StageName::Export.is_cacheable());
    }
}
