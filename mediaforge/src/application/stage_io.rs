// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The per-stage execution context stage adapters receive: a scratch
//! directory, a [`StageResult`] being accumulated, and a structured
//! logging span. Every file an adapter wants tracked must pass through
//! [`StageIoContext::track_file`], which enforces that the path resolves
//! inside the stage's own directory before it is recorded.

use chrono::{DateTime, Utc};
use mediaforge_domain::entities::{StageResult, TrackedFileRecord};
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::value_objects::{ContentHash, FileFormat, FileRole, JobId, LogicalType, MediaIdentity, StageName};
use std::path::{Path, PathBuf};
use tracing::Span;

pub struct StageIoContext {
    pub job_id: JobId,
    pub stage_name: StageName,
    pub job_dir: PathBuf,
    pub stage_dir: PathBuf,
    pub result: StageResult,
    /// The job's frozen `resolved_config` snapshot, passed through as the
    /// highest-precedence layer a stage executor resolves
    /// `{stage}.executable_path` and friends against — this is what makes
    /// `Job::resolved_config` the job-descriptor config layer.
    pub job_config_overrides: std::collections::HashMap<String, String>,
    /// Set by the demux stage executor once it has decoded the canonical
    /// PCM stream and fingerprinted it; the orchestrator applies this to
    /// the job on a successful run.
    pub media_identity: Option<MediaIdentity>,
    span: Span,
}

impl StageIoContext {
    pub fn begin(job_id: JobId, stage_name: StageName, job_dir: PathBuf, started_at: DateTime<Utc>) -> Self {
        let span = tracing::info_span!("stage", job_id = %job_id, stage = %stage_name);
        let stage_dir = job_dir.join(stage_name.dir_name());
        Self {
            job_id,
            stage_name,
            job_dir,
            stage_dir,
            result: StageResult::start(stage_name, started_at),
            job_config_overrides: std::collections::HashMap::new(),
            media_identity: None,
            span,
        }
    }

    pub fn with_job_config_overrides(mut self, overrides: std::collections::HashMap<String, String>) -> Self {
        self.job_config_overrides = overrides;
        self
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn logger(&self) -> StageLogger {
        StageLogger { span: self.span.clone() }
    }

    pub async fn ensure_stage_dir(&self) -> Result<(), MediaforgeError> {
        tokio::fs::create_dir_all(&self.stage_dir)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("creating stage directory: {e}")))
    }

    /// Resolves `candidate` (which must already be inside or under
    /// `stage_dir`) to its canonical form and rejects it if it escapes
    /// the stage sandbox — the one piece of defense against a
    /// misbehaving external tool writing outside its designated output
    /// directory via a symlink or `../` traversal.
    pub fn check_containment(&self, candidate: &Path) -> Result<PathBuf, MediaforgeError> {
        let canonical_stage_dir = self
            .stage_dir
            .canonicalize()
            .map_err(|e| MediaforgeError::io_error(format!("canonicalizing stage directory: {e}")))?;
        let canonical_candidate = candidate
            .canonicalize()
            .map_err(|e| MediaforgeError::io_error(format!("canonicalizing {}: {e}", candidate.display())))?;
        if !canonical_candidate.starts_with(&canonical_stage_dir) {
            return Err(MediaforgeError::ContainmentViolation(format!(
                "{} escapes stage directory {}",
                candidate.display(),
                self.stage_dir.display()
            )));
        }
        Ok(canonical_candidate)
    }

    /// Hashes and records a file already written under `stage_dir`,
    /// enforcing containment before the record is added to the
    /// in-progress [`StageResult`].
    #[allow(clippy::too_many_arguments)]
    pub async fn track_file(
        &mut self,
        relative_path: impl AsRef<Path>,
        role: FileRole,
        logical_type: LogicalType,
        format: FileFormat,
        reason_for_intermediate: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<TrackedFileRecord, MediaforgeError> {
        let relative_path = relative_path.as_ref();
        let absolute = self.stage_dir.join(relative_path);
        self.check_containment(&absolute)?;

        let bytes = tokio::fs::read(&absolute)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("reading {}: {e}", absolute.display())))?;
        let content_hash = ContentHash::of_bytes(&bytes);
        let size_bytes = bytes.len() as u64;

        let record = TrackedFileRecord::new(
            relative_path.to_path_buf(),
            role,
            logical_type,
            format,
            size_bytes,
            content_hash,
            now,
            reason_for_intermediate,
        );

        match role {
            FileRole::Input => self.result.track_input(record.clone()),
            FileRole::Output => self.result.track_output(record.clone()),
            FileRole::Intermediate => self.result.track_intermediate(record.clone()),
        }

        Ok(record)
    }
}

/// Thin wrapper so stage adapters log through the stage's span without
/// holding a `tracing::Span` reference directly (and without writing to
/// stdout/stderr themselves).
pub struct StageLogger {
    span: Span,
}

impl StageLogger {
    pub fn info(&self, message: &str) {
        let _guard = self.span.enter();
        tracing::info!("{message}");
    }

    pub fn warn(&self, message: &str) {
        let _guard = self.span.enter();
        tracing::warn!("{message}");
    }

    pub fn error(&self, message: &str) {
        let _guard = self.span.enter();
        tracing::error!("{message}");
    }
}
