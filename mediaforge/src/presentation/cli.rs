// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Dispatches a validated CLI command to its use case and maps the
//! result onto the documented exit code: `prepare-job` returns one of
//! exactly four codes (0 prepared, 1 validation failure, 2 missing
//! credentials, 3 budget exceeded); `run-pipeline` and `cache-evict`
//! return 0 on success and a nonzero code otherwise, enriched through
//! the bootstrap layer's generic error-to-exit-code mapping since they
//! have no small fixed outcome set of their own.

use crate::application::{CacheEvictUseCase, PrepareJobError, PrepareJobUseCase, RunPipelineUseCase};
use mediaforge_bootstrap::{map_error_to_exit_code, ValidatedCommand};
use mediaforge_domain::error::MediaforgeError;
use std::sync::Arc;

pub struct CliDispatcher {
    prepare_job: Arc<PrepareJobUseCase>,
    run_pipeline: Arc<RunPipelineUseCase>,
    cache_evict: Arc<CacheEvictUseCase>,
}

impl CliDispatcher {
    pub fn new(prepare_job: Arc<PrepareJobUseCase>, run_pipeline: Arc<RunPipelineUseCase>, cache_evict: Arc<CacheEvictUseCase>) -> Self {
        Self { prepare_job, run_pipeline, cache_evict }
    }

    pub async fn dispatch(&self, command: ValidatedCommand) -> i32 {
        match command {
            ValidatedCommand::PrepareJob {
                media,
                workflow,
                source_language,
                target_languages,
                user_id,
                start_time,
                end_time,
                tmdb_title,
                tmdb_year,
                estimate_only,
            } => {
                self.dispatch_prepare_job(
                    media,
                    workflow,
                    source_language,
                    target_languages,
                    user_id,
                    start_time,
                    end_time,
                    tmdb_title,
                    tmdb_year,
                    estimate_only,
                )
                .await
            }
            ValidatedCommand::RunPipeline { job, resume, stages } => self.dispatch_run_pipeline(job, resume, stages).await,
            ValidatedCommand::CacheEvict { keys } => self.dispatch_cache_evict(keys).await,
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn dispatch_prepare_job(
        &self,
        media: String,
        workflow: mediaforge_bootstrap::WorkflowArg,
        source_language: String,
        target_languages: Vec<String>,
        user_id: u64,
        start_time: Option<String>,
        end_time: Option<String>,
        tmdb_title: Option<String>,
        tmdb_year: Option<i32>,
        estimate_only: bool,
    ) -> i32 {
        let result = self
            .prepare_job
            .execute(
                media,
                workflow,
                source_language,
                target_languages,
                user_id,
                start_time,
                end_time,
                tmdb_title,
                tmdb_year,
                estimate_only,
            )
            .await;

        match result {
            Ok(outcome) => {
                println!(
                    "{{\"job_id\":\"{}\",\"cost_estimate_usd\":{},\"estimate_only\":{}}}",
                    outcome.job_id, outcome.cost_estimate_usd, outcome.estimate_only
                );
                0
            }
            Err(PrepareJobError::Validation(message)) => {
                eprintln!("validation error: {message}");
                1
            }
            Err(PrepareJobError::Domain(MediaforgeError::CredentialMissing(message))) => {
                eprintln!("missing credentials: {message}");
                2
            }
            Err(PrepareJobError::Domain(MediaforgeError::BudgetExceeded(message))) => {
                eprintln!("budget exceeded: {message}");
                3
            }
            Err(PrepareJobError::Domain(other)) => {
                eprintln!("job preparation failed: {other}");
                1
            }
        }
    }

    async fn dispatch_run_pipeline(&self, job: String, resume: bool, stages: Vec<String>) -> i32 {
        match self.run_pipeline.execute(job, resume, stages).await {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{e}");
                map_error_to_exit_code(&e).as_i32()
            }
        }
    }

    async fn dispatch_cache_evict(&self, keys: Vec<String>) -> i32 {
        match self.cache_evict.execute(&keys).await {
            Ok(outcome) => {
                if outcome.evicted_keys.is_empty() {
                    println!("cache size: {} bytes", outcome.total_size_bytes);
                } else {
                    println!("evicted {} entries; cache size now {} bytes", outcome.evicted_keys.len(), outcome.total_size_bytes);
                }
                0
            }
            Err(e) => {
                eprintln!("{e}");
                map_error_to_exit_code(&e).as_i32()
            }
        }
    }
}
