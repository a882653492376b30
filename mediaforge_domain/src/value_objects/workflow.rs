// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Workflow selection.

use crate::error::MediaforgeError;
use serde::{Deserialize, Serialize};

/// One of the three user-selectable workflows. Selects which stage
/// sequence the orchestrator runs (see
/// [`crate::services::stage_sequence`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Transcribe,
    Translate,
    Subtitle,
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Workflow::Transcribe => write!(f, "transcribe"),
            Workflow::Translate => write!(f, "translate"),
            Workflow::Subtitle => write!(f, "subtitle"),
        }
    }
}

impl std::str::FromStr for Workflow {
    type Err = MediaforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "transcribe" => Ok(Workflow::Transcribe),
            "translate" => Ok(Workflow::Translate),
            "subtitle" => Ok(Workflow::Subtitle),
            _ => Err(MediaforgeError::ValidationError(format!("unknown workflow: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Workflow::from_str("SUBTITLE").unwrap(), Workflow::Subtitle);
        assert_eq!(Workflow::from_str("translate").unwrap(), Workflow::Translate);
    }

    #[test]
    fn rejects_unknown_workflow() {
        assert!(Workflow::from_str("summarize").is_err());
    }
}
