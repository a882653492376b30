// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Result Entity
//!
//! One per job, per stage. Created at stage start, finalized exactly once
//! at stage end — finalization is idempotent, matching the StageIO
//! runtime's contract with stage adapters.

use super::TrackedFileRecord;
use crate::error::ErrorKind;
use crate::value_objects::{CacheKey, CacheOrigin, StageName, StageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageError {
    pub kind: ErrorKind,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    stage_name: StageName,
    status: StageStatus,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    inputs: Vec<TrackedFileRecord>,
    outputs: Vec<TrackedFileRecord>,
    intermediates: Vec<TrackedFileRecord>,
    /// The exact parameters this stage saw, as resolved by the
    /// configuration resolver — embedded verbatim.
    config_snapshot: HashMap<String, String>,
    errors: Vec<StageError>,
    warnings: Vec<String>,
    metrics: HashMap<String, f64>,
    cache_origin: CacheOrigin,
    source_cache_ref: Option<CacheKey>,
    /// Set exactly once by `finalize`; subsequent calls are no-ops
    /// Finalization is idempotent.
    finalized: bool,
}

impl StageResult {
    pub fn start(stage_name: StageName, started_at: DateTime<Utc>) -> Self {
        Self {
            stage_name,
            status: StageStatus::Running,
            started_at,
            finished_at: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            intermediates: Vec::new(),
            config_snapshot: HashMap::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            metrics: HashMap::new(),
            cache_origin: CacheOrigin::Computed,
            source_cache_ref: None,
            finalized: false,
        }
    }

    pub fn stage_name(&self) -> StageName {
        self.stage_name
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn track_input(&mut self, record: TrackedFileRecord) {
        self.inputs.push(record);
    }

    pub fn track_output(&mut self, record: TrackedFileRecord) {
        self.outputs.push(record);
    }

    pub fn track_intermediate(&mut self, record: TrackedFileRecord) {
        self.intermediates.push(record);
    }

    pub fn inputs(&self) -> &[TrackedFileRecord] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TrackedFileRecord] {
        &self.outputs
    }

    pub fn intermediates(&self) -> &[TrackedFileRecord] {
        &self.intermediates
    }

    /// Must be called before any external work; overwrites any prior
    /// snapshot (a stage calls this once, at the top of `begin`).
    pub fn set_config(&mut self, snapshot: HashMap<String, String>) {
        self.config_snapshot = snapshot;
    }

    pub fn config_snapshot(&self) -> &HashMap<String, String> {
        &self.config_snapshot
    }

    pub fn add_error(&mut self, kind: ErrorKind, message: impl Into<String>, occurred_at: DateTime<Utc>) {
        self.errors.push(StageError {
            kind,
            message: message.into(),
            occurred_at,
        });
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn errors(&self) -> &[StageError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn record_cache_hit(&mut self, source: CacheKey) {
        self.cache_origin = CacheOrigin::Hit;
        self.source_cache_ref = Some(source);
    }

    pub fn record_cache_miss(&mut self) {
        self.cache_origin = CacheOrigin::Miss;
    }

    pub fn cache_origin(&self) -> CacheOrigin {
        self.cache_origin
    }

    pub fn source_cache_ref(&self) -> Option<CacheKey> {
        self.source_cache_ref
    }

    pub fn metrics(&self) -> &HashMap<String, f64> {
        &self.metrics
    }

    /// Finalizes this stage result exactly once. Subsequent calls are a
    /// no-op, preserving the first recorded status; after finalize, no
    /// further tracking calls have effect.
    pub fn finalize(&mut self, status: StageStatus, finished_at: DateTime<Utc>, metrics: HashMap<String, f64>) {
        if self.finalized {
            return;
        }
        self.status = status;
        self.finished_at = Some(finished_at);
        self.metrics = metrics;
        self.finalized = true;
    }

    /// A stage in `success` must have at least one output record. Checked
    /// at finalize time by the StageIO runtime, not here — this is a
    /// read-only predicate for callers to assert against.
    pub fn satisfies_success_invariant(&self) -> bool {
        if self.status != StageStatus::Success {
            return true;
        }
        !self.outputs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{ContentHash, FileFormat, FileRole, LogicalType};

    fn sample_output() -> TrackedFileRecord {
        TrackedFileRecord::new(
            "segments.json".into(),
            FileRole::Output,
            LogicalType::new("segments"),
            FileFormat::new("json"),
            128,
            ContentHash::of_bytes(b"x"),
            Utc::now(),
            None,
        )
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut result = StageResult::start(StageName::Asr, Utc::now());
        result.track_output(sample_output());
        let first_finish = Utc::now();
        result.finalize(StageStatus::Success, first_finish, HashMap::new());
        result.finalize(StageStatus::Failed, Utc::now(), HashMap::new());
        assert_eq!(result.status(), StageStatus::Success);
    }

    #[test]
    fn success_without_outputs_violates_invariant() {
        let mut result = StageResult::start(StageName::Asr, Utc::now());
        result.finalize(StageStatus::Success, Utc::now(), HashMap::new());
        assert!(!result.satisfies_success_invariant());
    }

    #[test]
    fn success_with_outputs_satisfies_invariant() {
        let mut result = StageResult::start(StageName::Asr, Utc::now());
        result.track_output(sample_output());
        result.finalize(StageStatus::Success, Utc::now(), HashMap::new());
        assert!(result.satisfies_success_invariant());
    }
}
