// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Aggregate
//!
//! Coordinates one [`Job`] together with its ordered [`StageResult`]
//! history, enforcing that stages are appended in a consistent sequence
//! and raising the domain events the application layer persists and
//! reports. This is the only place outside the StageIO runtime allowed
//! to mutate a stage result once it has been appended.

use crate::entities::{Job, StageResult};
use crate::error::MediaforgeError;
use crate::events::{
    CacheHitEvent, CacheMissEvent, JobCompletedEvent, JobCreatedEvent, JobEvent, StageCompletedEvent, StageFailedEvent,
    StageSkippedResumeEvent, StageStartedEvent,
};
use crate::value_objects::{CacheKey, StageName, StageStatus};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct JobAggregate {
    job: Job,
    stage_results: Vec<StageResult>,
    uncommitted_events: Vec<JobEvent>,
}

impl JobAggregate {
    pub fn new(job: Job, now: DateTime<Utc>) -> Self {
        let job_id = job.job_id();
        let mut aggregate = Self {
            job,
            stage_results: Vec::new(),
            uncommitted_events: Vec::new(),
        };
        aggregate.raise(JobEvent::JobCreated(JobCreatedEvent {
            job_id,
            workflow: aggregate.job.workflow().to_string(),
            occurred_at: now,
        }));
        aggregate
    }

    /// Reconstructs an aggregate from previously persisted state without
    /// raising any events — used when a repository loads a job back from
    /// storage, as opposed to [`JobAggregate::new`] which is for jobs
    /// created fresh in this process.
    pub fn rehydrate(job: Job, stage_results: Vec<StageResult>) -> Self {
        Self {
            job,
            stage_results,
            uncommitted_events: Vec::new(),
        }
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    pub fn job_mut(&mut self) -> &mut Job {
        &mut self.job
    }

    pub fn stage_results(&self) -> &[StageResult] {
        &self.stage_results
    }

    pub fn stage_result(&self, stage_name: StageName) -> Option<&StageResult> {
        self.stage_results.iter().find(|r| r.stage_name() == stage_name)
    }

    /// Begins a new stage. Fails if this stage already has a result —
    /// resuming must go through [`JobAggregate::skip_stage_for_resume`]
    /// instead of starting over.
    pub fn start_stage(&mut self, stage_name: StageName, now: DateTime<Utc>) -> Result<(), MediaforgeError> {
        if self.stage_result(stage_name).is_some() {
            return Err(MediaforgeError::internal_error(format!(
                "stage {} already has a result on this job",
                stage_name
            )));
        }
        self.stage_results.push(StageResult::start(stage_name, now));
        self.raise(JobEvent::StageStarted(StageStartedEvent {
            job_id: self.job.job_id(),
            stage_name,
            occurred_at: now,
        }));
        Ok(())
    }

    /// Finalizes `stage_name` as `Success`. A stage in success must carry
    /// at least one tracked output — callers merge a stage's real I/O via
    /// [`JobAggregate::merge_stage_io`] before calling this.
    pub fn complete_stage(&mut self, stage_name: StageName, now: DateTime<Utc>) -> Result<(), MediaforgeError> {
        let job_id = self.job.job_id();
        let result = self.require_stage_mut(stage_name)?;
        result.finalize(StageStatus::Success, now, result.metrics().clone());
        if !result.satisfies_success_invariant() {
            return Err(MediaforgeError::internal_error(format!(
                "stage {} finalized as success with no tracked outputs",
                stage_name
            )));
        }
        self.raise(JobEvent::StageCompleted(StageCompletedEvent {
            job_id,
            stage_name,
            occurred_at: now,
        }));
        Ok(())
    }

    /// Copies the inputs/outputs/intermediates tracked on `result` (built
    /// outside the aggregate, by the `StageIoContext` the application
    /// layer drives stage execution through) onto this aggregate's own
    /// persisted result for the same stage, so `complete_stage` finalizes
    /// the record the stage adapter actually populated.
    pub fn merge_stage_io(&mut self, stage_name: StageName, result: &StageResult) -> Result<(), MediaforgeError> {
        let target = self.require_stage_mut(stage_name)?;
        for input in result.inputs() {
            target.track_input(input.clone());
        }
        for output in result.outputs() {
            target.track_output(output.clone());
        }
        for intermediate in result.intermediates() {
            target.track_intermediate(intermediate.clone());
        }
        Ok(())
    }

    /// Discards `stage_name`'s recorded result entirely. Used by the
    /// resume algorithm to invalidate a stage, and everything downstream
    /// of it, before re-running from scratch.
    pub fn remove_stage_result(&mut self, stage_name: StageName) {
        self.stage_results.retain(|r| r.stage_name() != stage_name);
    }

    pub fn fail_stage(
        &mut self,
        stage_name: StageName,
        kind: crate::error::ErrorKind,
        error_message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), MediaforgeError> {
        let job_id = self.job.job_id();
        let error_message = error_message.into();
        let result = self.require_stage_mut(stage_name)?;
        result.add_error(kind, error_message.clone(), now);
        result.finalize(StageStatus::Failed, now, result.metrics().clone());
        self.raise(JobEvent::StageFailed(StageFailedEvent {
            job_id,
            stage_name,
            error_message,
            occurred_at: now,
        }));
        Ok(())
    }

    /// Records a stage whose prior outputs were verified intact across a
    /// resumed run, without re-executing it. Replaces the existing result
    /// rather than appending, carrying its tracked files forward so
    /// downstream cache-key construction still sees this stage's
    /// artifact hashes.
    pub fn skip_stage_for_resume(&mut self, stage_name: StageName, now: DateTime<Utc>) {
        let prior = self.stage_result(stage_name).cloned();
        self.stage_results.retain(|r| r.stage_name() != stage_name);

        let mut result = StageResult::start(stage_name, now);
        if let Some(prior) = prior {
            for input in prior.inputs() {
                result.track_input(input.clone());
            }
            for output in prior.outputs() {
                result.track_output(output.clone());
            }
            for intermediate in prior.intermediates() {
                result.track_intermediate(intermediate.clone());
            }
        }
        result.finalize(StageStatus::SkippedResume, now, Default::default());
        self.stage_results.push(result);
        self.raise(JobEvent::StageSkippedResume(StageSkippedResumeEvent {
            job_id: self.job.job_id(),
            stage_name,
            occurred_at: now,
        }));
    }

    pub fn record_cache_hit(&mut self, stage_name: StageName, cache_key: CacheKey, now: DateTime<Utc>) -> Result<(), MediaforgeError> {
        let job_id = self.job.job_id();
        let result = self.require_stage_mut(stage_name)?;
        result.record_cache_hit(cache_key);
        self.raise(JobEvent::CacheHit(CacheHitEvent {
            job_id,
            stage_name,
            cache_key,
            occurred_at: now,
        }));
        Ok(())
    }

    pub fn record_cache_miss(&mut self, stage_name: StageName, cache_key: CacheKey, now: DateTime<Utc>) -> Result<(), MediaforgeError> {
        let job_id = self.job.job_id();
        let result = self.require_stage_mut(stage_name)?;
        result.record_cache_miss();
        self.raise(JobEvent::CacheMiss(CacheMissEvent {
            job_id,
            stage_name,
            cache_key,
            occurred_at: now,
        }));
        Ok(())
    }

    /// Whether every tracked stage has reached a terminal, non-failing
    /// status. Does not itself check that all twelve stages ran — stage
    /// sequencing is owned by [`crate::services::stage_sequence`].
    pub fn all_stages_succeeded(&self) -> bool {
        self.stage_results.iter().all(|r| matches!(r.status(), StageStatus::Success | StageStatus::SkippedResume | StageStatus::Skipped))
    }

    pub fn complete_job(&mut self, now: DateTime<Utc>) {
        let succeeded = self.all_stages_succeeded();
        self.raise(JobEvent::JobCompleted(JobCompletedEvent {
            job_id: self.job.job_id(),
            succeeded,
            occurred_at: now,
        }));
    }

    pub fn uncommitted_events(&self) -> &[JobEvent] {
        &self.uncommitted_events
    }

    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn require_stage_mut(&mut self, stage_name: StageName) -> Result<&mut StageResult, MediaforgeError> {
        self.stage_results
            .iter_mut()
            .find(|r| r.stage_name() == stage_name)
            .ok_or_else(|| MediaforgeError::internal_error(format!("no stage result for {}", stage_name)))
    }

    fn raise(&mut self, event: JobEvent) {
        self.uncommitted_events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TrackedFileRecord;
    use crate::value_objects::{ContentHash, FileFormat, FileRole, JobId, LanguageCode, LogicalType, MediaProcessing, UserId, Workflow};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn sample_output() -> TrackedFileRecord {
        TrackedFileRecord::new(
            "audio.pcm".into(),
            FileRole::Output,
            LogicalType::new("audio"),
            FileFormat::new("pcm_s16le"),
            4,
            ContentHash::of_bytes(b"x"),
            Utc::now(),
            None,
        )
    }

    fn sample_aggregate() -> JobAggregate {
        let job = Job::new(
            JobId::new(NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), 7, 1),
            UserId::new(7),
            Workflow::Transcribe,
            LanguageCode::auto(),
            vec![],
            "input.mp4".into(),
            MediaProcessing::Full,
            Utc::now(),
            HashMap::new(),
        );
        JobAggregate::new(job, Utc::now())
    }

    #[test]
    fn creating_aggregate_raises_job_created() {
        let aggregate = sample_aggregate();
        assert_eq!(aggregate.uncommitted_events().len(), 1);
        assert!(matches!(aggregate.uncommitted_events()[0], JobEvent::JobCreated(_)));
    }

    #[test]
    fn cannot_start_same_stage_twice() {
        let mut aggregate = sample_aggregate();
        aggregate.start_stage(StageName::Demux, Utc::now()).unwrap();
        let err = aggregate.start_stage(StageName::Demux, Utc::now());
        assert!(err.is_err());
    }

    #[test]
    fn complete_stage_raises_completed_event() {
        let mut aggregate = sample_aggregate();
        aggregate.start_stage(StageName::Demux, Utc::now()).unwrap();
        let mut io_result = StageResult::start(StageName::Demux, Utc::now());
        io_result.track_output(sample_output());
        aggregate.merge_stage_io(StageName::Demux, &io_result).unwrap();
        aggregate.mark_events_as_committed();
        aggregate.complete_stage(StageName::Demux, Utc::now()).unwrap();
        assert!(matches!(aggregate.uncommitted_events()[0], JobEvent::StageCompleted(_)));
        assert_eq!(aggregate.stage_result(StageName::Demux).unwrap().status(), StageStatus::Success);
    }

    #[test]
    fn complete_stage_rejects_success_with_no_tracked_outputs() {
        let mut aggregate = sample_aggregate();
        aggregate.start_stage(StageName::Demux, Utc::now()).unwrap();
        assert!(aggregate.complete_stage(StageName::Demux, Utc::now()).is_err());
    }

    #[test]
    fn merge_stage_io_copies_outputs_from_external_result() {
        let mut aggregate = sample_aggregate();
        aggregate.start_stage(StageName::Demux, Utc::now()).unwrap();
        let mut io_result = StageResult::start(StageName::Demux, Utc::now());
        io_result.track_output(sample_output());
        aggregate.merge_stage_io(StageName::Demux, &io_result).unwrap();
        assert_eq!(aggregate.stage_result(StageName::Demux).unwrap().outputs().len(), 1);
    }

    #[test]
    fn remove_stage_result_clears_recorded_stage() {
        let mut aggregate = sample_aggregate();
        aggregate.start_stage(StageName::Demux, Utc::now()).unwrap();
        aggregate.remove_stage_result(StageName::Demux);
        assert!(aggregate.stage_result(StageName::Demux).is_none());
    }

    #[test]
    fn skip_stage_for_resume_replaces_rather_than_duplicates_and_carries_outputs() {
        let mut aggregate = sample_aggregate();
        aggregate.start_stage(StageName::Demux, Utc::now()).unwrap();
        let mut io_result = StageResult::start(StageName::Demux, Utc::now());
        io_result.track_output(sample_output());
        aggregate.merge_stage_io(StageName::Demux, &io_result).unwrap();
        aggregate.complete_stage(StageName::Demux, Utc::now()).unwrap();

        aggregate.skip_stage_for_resume(StageName::Demux, Utc::now());

        assert_eq!(aggregate.stage_results().iter().filter(|r| r.stage_name() == StageName::Demux).count(), 1);
        let result = aggregate.stage_result(StageName::Demux).unwrap();
        assert_eq!(result.status(), StageStatus::SkippedResume);
        assert_eq!(result.outputs().len(), 1);
    }

    #[test]
    fn cache_hit_requires_started_stage() {
        let mut aggregate = sample_aggregate();
        let key = CacheKey::new(StageName::Asr, ContentHash::of_bytes(b"x"));
        assert!(aggregate.record_cache_hit(StageName::Asr, key, Utc::now()).is_err());
    }
}
