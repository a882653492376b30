// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `run-pipeline` use case: resolves a job id and an optional stage
//! subset, then delegates to the [`Orchestrator`].

use crate::application::orchestrator::Orchestrator;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::value_objects::{JobId, StageName};
use std::str::FromStr;
use std::sync::Arc;

pub struct RunPipelineUseCase {
    orchestrator: Arc<Orchestrator>,
}

impl RunPipelineUseCase {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, job: String, resume: bool, stages: Vec<String>) -> Result<(), MediaforgeError> {
        let job_id = JobId::parse(&job)?;
        let only_stages = stages.iter().map(|s| StageName::from_str(s)).collect::<Result<Vec<_>, _>>()?;
        self.orchestrator.run(job_id, resume, &only_stages).await
    }
}
