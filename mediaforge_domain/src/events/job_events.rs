// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Job lifecycle and stage-level events.

use crate::value_objects::{CacheKey, JobId, StageName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JobEvent {
    JobCreated(JobCreatedEvent),
    StageStarted(StageStartedEvent),
    StageCompleted(StageCompletedEvent),
    StageFailed(StageFailedEvent),
    StageSkippedResume(StageSkippedResumeEvent),
    CacheHit(CacheHitEvent),
    CacheMiss(CacheMissEvent),
    JobCompleted(JobCompletedEvent),
}

impl JobEvent {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            JobEvent::JobCreated(e) => e.occurred_at,
            JobEvent::StageStarted(e) => e.occurred_at,
            JobEvent::StageCompleted(e) => e.occurred_at,
            JobEvent::StageFailed(e) => e.occurred_at,
            JobEvent::StageSkippedResume(e) => e.occurred_at,
            JobEvent::CacheHit(e) => e.occurred_at,
            JobEvent::CacheMiss(e) => e.occurred_at,
            JobEvent::JobCompleted(e) => e.occurred_at,
        }
    }

    pub fn job_id(&self) -> JobId {
        match self {
            JobEvent::JobCreated(e) => e.job_id,
            JobEvent::StageStarted(e) => e.job_id,
            JobEvent::StageCompleted(e) => e.job_id,
            JobEvent::StageFailed(e) => e.job_id,
            JobEvent::StageSkippedResume(e) => e.job_id,
            JobEvent::CacheHit(e) => e.job_id,
            JobEvent::CacheMiss(e) => e.job_id,
            JobEvent::JobCompleted(e) => e.job_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreatedEvent {
    pub job_id: JobId,
    pub workflow: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageStartedEvent {
    pub job_id: JobId,
    pub stage_name: StageName,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageCompletedEvent {
    pub job_id: JobId,
    pub stage_name: StageName,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageFailedEvent {
    pub job_id: JobId,
    pub stage_name: StageName,
    pub error_message: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSkippedResumeEvent {
    pub job_id: JobId,
    pub stage_name: StageName,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheHitEvent {
    pub job_id: JobId,
    pub stage_name: StageName,
    pub cache_key: CacheKey,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMissEvent {
    pub job_id: JobId,
    pub stage_name: StageName,
    pub cache_key: CacheKey,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCompletedEvent {
    pub job_id: JobId,
    pub succeeded: bool,
    pub occurred_at: DateTime<Utc>,
}
