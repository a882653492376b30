// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Compiled-in, lowest-precedence configuration: the bottom layer a
//! [`super::LayeredConfigLoader`] always includes, so a stage can be
//! resolved even on a machine with no system config file at all.

use mediaforge_domain::value_objects::{ConfigLayer, ConfigLayerKind, StageName};
use std::collections::HashMap;

/// Default executable names, assumed reachable on `PATH`. Real
/// deployments are expected to override these via system config or
/// job-local env once tools live at fixed install locations.
fn default_executable(stage: StageName) -> &'static str {
    match stage {
        StageName::Demux => "ffmpeg",
        StageName::MetadataEnrich => "mediaforge-metadata-enrich",
        StageName::GlossaryLoad => "mediaforge-glossary-load",
        StageName::SourceSeparate => "demucs",
        StageName::VoiceActivityDiarize => "mediaforge-vad",
        StageName::Asr => "whisper",
        StageName::Alignment => "mediaforge-align",
        StageName::LyricsDetect => "mediaforge-lyrics-detect",
        StageName::HallucinationRemove => "mediaforge-dehallucinate",
        StageName::Translate => "mediaforge-translate",
        StageName::SubtitleEncode => "mediaforge-subtitle-encode",
        StageName::Mux => "ffmpeg",
        StageName::Export => "mediaforge-export",
    }
}

/// Default per-stage timeout, seconds. Stages that shell out to
/// model-heavy tools (ASR, translation, source separation) get a longer
/// allowance than the cheap container-level ones.
fn default_timeout_secs(stage: StageName) -> &'static str {
    match stage {
        StageName::Asr | StageName::SourceSeparate | StageName::Translate => "1800",
        StageName::VoiceActivityDiarize | StageName::Alignment => "600",
        _ => "300",
    }
}

fn default_max_retries(stage: StageName) -> &'static str {
    if stage.supports_graceful_degradation() {
        "1"
    } else {
        "2"
    }
}

pub fn hard_coded_defaults() -> ConfigLayer {
    let mut values = HashMap::new();
    for stage in StageName::ALL {
        let prefix = stage.as_str();
        values.insert(format!("{prefix}.executable_path"), default_executable(stage).to_string());
        values.insert(format!("{prefix}.timeout_secs"), default_timeout_secs(stage).to_string());
        values.insert(format!("{prefix}.max_retries"), default_max_retries(stage).to_string());
    }
    ConfigLayer::new(ConfigLayerKind::HardCodedDefault, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stage_has_an_executable_path_default() {
        let defaults = hard_coded_defaults();
        for stage in StageName::ALL {
            assert!(defaults.values.contains_key(&format!("{}.executable_path", stage.as_str())));
        }
    }
}
