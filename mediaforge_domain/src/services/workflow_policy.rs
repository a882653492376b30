// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Per-stage timeout and failure-handling policy. Kept as data rather than
//! scattered `match` arms so the orchestrator's retry/degrade behavior can
//! be read off in one place and overridden per job by the configuration
//! resolver.

use crate::value_objects::StageName;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct StagePolicy {
    pub timeout: Duration,
    pub continue_on_failure: bool,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowPolicy;

impl WorkflowPolicy {
    pub fn policy_for(stage: StageName) -> StagePolicy {
        let continue_on_failure = stage.supports_graceful_degradation();
        let (timeout_secs, max_retries) = match stage {
            StageName::Demux => (300, 0),
            StageName::MetadataEnrich => (30, 2),
            StageName::GlossaryLoad => (30, 1),
            StageName::SourceSeparate => (900, 1),
            StageName::VoiceActivityDiarize => (300, 1),
            StageName::Asr => (1800, 2),
            StageName::Alignment => (300, 1),
            StageName::LyricsDetect => (300, 1),
            StageName::HallucinationRemove => (120, 1),
            StageName::Translate => (600, 2),
            StageName::SubtitleEncode => (120, 0),
            StageName::Mux => (300, 0),
            StageName::Export => (120, 0),
        };
        StagePolicy {
            timeout: Duration::from_secs(timeout_secs),
            continue_on_failure,
            max_retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandatory_stages_never_continue_on_failure() {
        assert!(!WorkflowPolicy::policy_for(StageName::Demux).continue_on_failure);
        assert!(!WorkflowPolicy::policy_for(StageName::Asr).continue_on_failure);
        assert!(!WorkflowPolicy::policy_for(StageName::Mux).continue_on_failure);
    }

    #[test]
    fn optional_stages_continue_on_failure() {
        assert!(WorkflowPolicy::policy_for(StageName::SourceSeparate).continue_on_failure);
        assert!(WorkflowPolicy::policy_for(StageName::LyricsDetect).continue_on_failure);
    }

    #[test]
    fn asr_has_the_longest_timeout() {
        let asr = WorkflowPolicy::policy_for(StageName::Asr).timeout;
        for stage in StageName::ALL {
            assert!(asr >= WorkflowPolicy::policy_for(stage).timeout);
        }
    }
}
