// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Stage lifecycle status and cache-origin tags.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Pending,
    Running,
    Success,
    Failed,
    Skipped,
    /// Resume-specific outcome: the stage's prior outputs were intact and
    /// it was not re-executed.
    SkippedResume,
}

impl StageStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StageStatus::Success | StageStatus::Failed | StageStatus::Skipped | StageStatus::SkippedResume
        )
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, StageStatus::Success | StageStatus::SkippedResume)
    }
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StageStatus::Pending => "pending",
            StageStatus::Running => "running",
            StageStatus::Success => "success",
            StageStatus::Failed => "failed",
            StageStatus::Skipped => "skipped",
            StageStatus::SkippedResume => "skipped-resume",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheOrigin {
    Computed,
    Hit,
    Miss,
}

impl std::fmt::Display for CacheOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CacheOrigin::Computed => "computed",
            CacheOrigin::Hit => "hit",
            CacheOrigin::Miss => "miss",
        };
        write!(f, "{}", s)
    }
}
