// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `prepare-job` use case: resolves the CLI's loosely typed strings
//! into domain value objects and delegates to [`JobPreparationService`].

use crate::application::job_preparation::{ClipBounds, JobPreparationOutcome, JobPreparationRequest, JobPreparationService};
use mediaforge_bootstrap::{parse_timestamp, WorkflowArg};
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::value_objects::{LanguageCode, UserId, Workflow};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepareJobError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Domain(#[from] MediaforgeError),
}

pub struct PrepareJobUseCase {
    service: Arc<JobPreparationService>,
}

impl PrepareJobUseCase {
    pub fn new(service: Arc<JobPreparationService>) -> Self {
        Self { service }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn execute(
        &self,
        media: String,
        workflow: WorkflowArg,
        source_language: String,
        target_languages: Vec<String>,
        user_id: u64,
        start_time: Option<String>,
        end_time: Option<String>,
        tmdb_title: Option<String>,
        tmdb_year: Option<i32>,
        estimate_only: bool,
    ) -> Result<JobPreparationOutcome, PrepareJobError> {
        let workflow = match workflow {
            WorkflowArg::Transcribe => Workflow::Transcribe,
            WorkflowArg::Translate => Workflow::Translate,
            WorkflowArg::Subtitle => Workflow::Subtitle,
        };
        let source_language = LanguageCode::parse(&source_language)?;
        let target_languages = target_languages.iter().map(|s| LanguageCode::parse(s)).collect::<Result<Vec<_>, _>>()?;
        let clip = match (start_time, end_time) {
            (Some(start), Some(end)) => Some(ClipBounds {
                start_ms: parse_timestamp(&start).map_err(|e| PrepareJobError::Validation(e.to_string()))?,
                end_ms: parse_timestamp(&end).map_err(|e| PrepareJobError::Validation(e.to_string()))?,
            }),
            (None, None) => None,
            _ => return Err(PrepareJobError::Validation("clipping requires both start and end times".into())),
        };

        let request = JobPreparationRequest {
            user_id: UserId::new(user_id),
            media,
            workflow,
            source_language,
            target_languages,
            clip,
            tmdb_title,
            tmdb_year,
            estimate_only,
        };

        Ok(self.service.prepare(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_lopsided_clip_bounds() {
        let err = PrepareJobError::Validation("clipping requires both start and end times".into());
        assert!(matches!(err, PrepareJobError::Validation(_)));
    }
}
