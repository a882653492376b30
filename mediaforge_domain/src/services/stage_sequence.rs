// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Maps a [`Workflow`] to its ordered stage list. `Transcribe` and
//! `Translate` run the lean subset needed to produce a transcript (plus,
//! for `Translate`, the translation stage) and finish at `export`, the
//! stage that writes the delivered artifact; neither touches source
//! separation, lyrics handling, or subtitle/mux assembly, since those
//! only matter once burned-in subtitles are requested. `Subtitle` runs
//! the full chain through subtitle encoding and mux.

use crate::value_objects::{StageName, Workflow};

pub fn stages_for_workflow(workflow: Workflow) -> Vec<StageName> {
    use StageName::*;
    match workflow {
        Workflow::Transcribe => vec![Demux, VoiceActivityDiarize, Asr, Alignment, Export],
        Workflow::Translate => vec![Demux, VoiceActivityDiarize, Asr, Alignment, Translate, Export],
        Workflow::Subtitle => vec![
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
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcribe_excludes_translate_and_subtitle_encode() {
        let stages = stages_for_workflow(Workflow::Transcribe);
        assert!(!stages.contains(&StageName::Translate));
        assert!(!stages.contains(&StageName::SubtitleEncode));
    }

    #[test]
    fn transcribe_runs_exactly_the_lean_subset() {
        use StageName::*;
        let stages = stages_for_workflow(Workflow::Transcribe);
        assert_eq!(stages, vec![Demux, VoiceActivityDiarize, Asr, Alignment, Export]);
    }

    #[test]
    fn translate_adds_the_translate_stage_before_export() {
        use StageName::*;
        let stages = stages_for_workflow(Workflow::Translate);
        assert_eq!(stages, vec![Demux, VoiceActivityDiarize, Asr, Alignment, Translate, Export]);
    }

    #[test]
    fn subtitle_workflow_runs_every_stage_except_export() {
        let stages = stages_for_workflow(Workflow::Subtitle);
        assert!(!stages.contains(&StageName::Export));
        assert_eq!(stages.len(), StageName::ALL.len() - 1);
    }

    #[test]
    fn transcribe_and_translate_end_with_export_while_subtitle_ends_with_mux() {
        for workflow in [Workflow::Transcribe, Workflow::Translate] {
            let stages = stages_for_workflow(workflow);
            assert_eq!(*stages.first().unwrap(), StageName::Demux);
            assert_eq!(*stages.last().unwrap(), StageName::Export);
        }
        assert_eq!(*stages_for_workflow(Workflow::Subtitle).last().unwrap(), StageName::Mux);
    }
}
