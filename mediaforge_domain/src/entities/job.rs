// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Entity
//!
//! The unit of work submitted by a user: one source media item, one
//! workflow, and the resolved parameters frozen at job preparation time.
//! A `Job` does not own its stage results — the aggregate in
//! [`crate::aggregates::JobAggregate`] coordinates a `Job` together with
//! its ordered `Vec<StageResult>`.

use crate::value_objects::{JobId, LanguageCode, MediaIdentity, MediaProcessing, UserId, Workflow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    job_id: JobId,
    user_id: UserId,
    workflow: Workflow,
    source_language: LanguageCode,
    target_languages: Vec<LanguageCode>,
    input_media_path: PathBuf,
    media_identity: Option<MediaIdentity>,
    media_processing: MediaProcessing,
    created_at: DateTime<Utc>,
    /// The fully resolved configuration this job will run with, frozen at
    /// job preparation time so later system-config changes cannot alter
    /// an in-flight job.
    resolved_config: HashMap<String, String>,
}

impl Job {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        job_id: JobId,
        user_id: UserId,
        workflow: Workflow,
        source_language: LanguageCode,
        target_languages: Vec<LanguageCode>,
        input_media_path: PathBuf,
        media_processing: MediaProcessing,
        created_at: DateTime<Utc>,
        resolved_config: HashMap<String, String>,
    ) -> Self {
        Self {
            job_id,
            user_id,
            workflow,
            source_language,
            target_languages,
            input_media_path,
            media_identity: None,
            media_processing,
            created_at,
            resolved_config,
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn workflow(&self) -> Workflow {
        self.workflow
    }

    pub fn source_language(&self) -> &LanguageCode {
        &self.source_language
    }

    pub fn target_languages(&self) -> &[LanguageCode] {
        &self.target_languages
    }

    pub fn input_media_path(&self) -> &PathBuf {
        &self.input_media_path
    }

    pub fn media_processing(&self) -> MediaProcessing {
        self.media_processing
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn resolved_config(&self) -> &HashMap<String, String> {
        &self.resolved_config
    }

    pub fn media_identity(&self) -> Option<MediaIdentity> {
        self.media_identity
    }

    /// Set once, by the demux stage, the first time this job's source
    /// media is decoded. A job that is resumed never calls this again —
    /// the identity computed on the first run is load-bearing for every
    /// downstream cache lookup.
    pub fn set_media_identity(&mut self, identity: MediaIdentity) {
        self.media_identity = Some(identity);
    }
}
