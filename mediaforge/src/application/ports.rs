// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Port the orchestrator drives to execute a single stage, kept separate
//! from [`mediaforge_domain::repositories`] because it belongs to the
//! application layer's own seam (the stage adapters it dispatches to are
//! infrastructure, not a domain concept).

use crate::application::stage_io::StageIoContext;
use async_trait::async_trait;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::value_objects::StageName;
use std::path::Path;

#[async_trait]
pub trait StageExecutorPort: Send + Sync {
    /// Runs the named stage against the given context, applying its
    /// configured timeout and retry policy. Returns `Ok(())` on success;
    /// the caller decides whether a failure is fatal or gracefully
    /// degraded based on the stage's policy.
    async fn execute(&self, stage: StageName, ctx: &mut StageIoContext) -> Result<(), MediaforgeError>;
}

/// Port for the lightweight duration probe job preparation needs for its
/// a-priori cost estimate, run before stage 01 demux produces the
/// canonical PCM stream and its exact duration. A separate seam from
/// [`StageExecutorPort`] because it is a read-only query, not a stage.
#[async_trait]
pub trait DurationProbePort: Send + Sync {
    async fn probe_duration_ms(&self, media_path: &Path) -> Result<u64, MediaforgeError>;
}
