// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The orchestrator: given a job id, runs the workflow's stage sequence
//! to completion or a fatal failure. Depends only on domain ports
//! (`JobRepository`, `StageExecutorPort`), mirroring how a pipeline
//! runner should stay unit-testable against in-memory fakes rather than
//! concrete infrastructure.

use crate::application::ports::StageExecutorPort;
use crate::application::stage_io::StageIoContext;
use mediaforge_domain::aggregates::JobAggregate;
use mediaforge_domain::entities::StageResult;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::repositories::{CacheRepository, CostEvent, CostEventSink, JobRepository};
use mediaforge_domain::services::{stages_for_workflow, CacheKeyBuilder, WorkflowPolicy};
use mediaforge_domain::value_objects::{CacheKey, ContentHash, CostRateTable, FileFormat, FileRole, JobId, LogicalType, StageName};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct Orchestrator {
    job_repository: Arc<dyn JobRepository>,
    stage_executor: Arc<dyn StageExecutorPort>,
    cache_repository: Arc<dyn CacheRepository>,
    cost_event_sink: Arc<dyn CostEventSink>,
    jobs_root: PathBuf,
    cost_rates: CostRateTable,
}

impl Orchestrator {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        stage_executor: Arc<dyn StageExecutorPort>,
        cache_repository: Arc<dyn CacheRepository>,
        cost_event_sink: Arc<dyn CostEventSink>,
        jobs_root: PathBuf,
    ) -> Self {
        Self {
            job_repository,
            stage_executor,
            cache_repository,
            cost_event_sink,
            jobs_root,
            cost_rates: CostRateTable::default_table(),
        }
    }

    fn job_dir(&self, job_id: JobId) -> PathBuf {
        self.jobs_root.join(job_id.relative_dir())
    }

    /// Runs `job_id`'s stage sequence. When `only_stages` is non-empty,
    /// only those stages run (still in declared order) — used by
    /// `run-pipeline --stages`. When `resume` is true, a stage whose
    /// prior result already succeeded is skipped rather than re-run.
    pub async fn run(&self, job_id: JobId, resume: bool, only_stages: &[StageName]) -> Result<(), MediaforgeError> {
        let mut aggregate = self
            .job_repository
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| MediaforgeError::JobNotFound(job_id.to_string()))?;

        let full_sequence = stages_for_workflow(aggregate.job().workflow());
        let stages: Vec<StageName> = if only_stages.is_empty() {
            full_sequence
        } else {
            full_sequence.into_iter().filter(|s| only_stages.contains(s)).collect()
        };

        for stage in stages {
            if resume {
                if let Some(existing) = aggregate.stage_result(stage).cloned() {
                    let intact = existing.status().is_successful() && self.outputs_intact(&aggregate, &existing).await?;
                    if intact {
                        aggregate.skip_stage_for_resume(stage, chrono::Utc::now());
                        info!(%stage, "skipping already-succeeded stage on resume");
                        continue;
                    }
                    warn!(%stage, status = %existing.status(), "invalidating stage and downstream stages before re-running");
                    self.invalidate_downstream(&mut aggregate, stage.ordinal()).await?;
                }
            }

            if let Err(e) = self.run_one_stage(&mut aggregate, stage).await {
                if !WorkflowPolicy::policy_for(stage).continue_on_failure {
                    self.job_repository.save(&aggregate).await?;
                    return Err(MediaforgeError::SubsystemError(format!("stage {stage} failed: {e}")));
                }
                warn!(%stage, error = %e, "optional stage failed, continuing with graceful degradation");
            }
            self.job_repository.save(&aggregate).await?;
        }

        aggregate.complete_job(chrono::Utc::now());
        self.job_repository.save(&aggregate).await?;
        aggregate.mark_events_as_committed();
        Ok(())
    }

    /// Re-reads every output `existing` recorded, from the stage's own
    /// directory on disk, and compares its content hash against what was
    /// recorded at finalize time. A missing file or a hash mismatch means
    /// the stage's outputs can no longer be trusted.
    async fn outputs_intact(&self, aggregate: &JobAggregate, existing: &StageResult) -> Result<bool, MediaforgeError> {
        let stage_dir = self.job_dir(aggregate.job().job_id()).join(existing.stage_name().dir_name());
        for output in existing.outputs() {
            let path = stage_dir.join(output.path());
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(_) => return Ok(false),
            };
            if ContentHash::of_bytes(&bytes) != output.content_hash() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Discards the recorded result and deletes the on-disk stage
    /// directory for `from_ordinal` and every stage downstream of it, so
    /// a subsequent pass through the stage loop finds nothing to skip and
    /// re-executes them fresh.
    async fn invalidate_downstream(&self, aggregate: &mut JobAggregate, from_ordinal: u8) -> Result<(), MediaforgeError> {
        let job_dir = self.job_dir(aggregate.job().job_id());
        for stage in StageName::ALL {
            if stage.ordinal() < from_ordinal {
                continue;
            }
            aggregate.remove_stage_result(stage);
            let stage_dir = job_dir.join(stage.dir_name());
            if tokio::fs::try_exists(&stage_dir).await.unwrap_or(false) {
                tokio::fs::remove_dir_all(&stage_dir)
                    .await
                    .map_err(|e| MediaforgeError::io_error(format!("invalidating {}: {e}", stage_dir.display())))?;
            }
        }
        Ok(())
    }

    async fn run_one_stage(&self, aggregate: &mut JobAggregate, stage: StageName) -> Result<(), MediaforgeError> {
        let job_id = aggregate.job().job_id();
        let now = chrono::Utc::now();
        aggregate.start_stage(stage, now)?;

        let mut ctx = StageIoContext::begin(job_id, stage, self.job_dir(job_id), now)
            .with_job_config_overrides(aggregate.job().resolved_config().clone());
        ctx.ensure_stage_dir().await?;

        let cache_key = self.cache_key_for(aggregate, stage);
        if let Some(key) = cache_key {
            if self.cache_repository.contains(&key).await? {
                self.adopt_cache_hit(&mut ctx, &key).await?;
                aggregate.record_cache_hit(stage, key, chrono::Utc::now())?;
                aggregate.merge_stage_io(stage, &ctx.result)?;
                aggregate.complete_stage(stage, chrono::Utc::now())?;
                self.emit_cost_event(job_id, stage, 0.0).await?;
                return Ok(());
            }
            aggregate.record_cache_miss(stage, key, chrono::Utc::now())?;
        }

        let policy = WorkflowPolicy::policy_for(stage);
        let mut last_error = None;
        for attempt in 0..=policy.max_retries {
            match self.execute_with_timeout(stage, &mut ctx, policy.timeout).await {
                Ok(()) => {
                    if let Some(identity) = ctx.media_identity {
                        aggregate.job_mut().set_media_identity(identity);
                    }
                    if let Some(key) = cache_key {
                        self.cache_repository.commit(&key, &ctx.stage_dir).await?;
                    }
                    aggregate.merge_stage_io(stage, &ctx.result)?;
                    aggregate.complete_stage(stage, chrono::Utc::now())?;
                    let usd = self.cost_for(aggregate, stage);
                    self.emit_cost_event(job_id, stage, usd).await?;
                    return Ok(());
                }
                Err(e) => {
                    last_error = Some(e.clone());
                    if attempt < policy.max_retries && e.is_retryable() {
                        warn!(%stage, attempt, error = %e, "retrying after transient failure");
                        continue;
                    }
                    break;
                }
            }
        }

        let error = last_error.expect("loop always runs at least once");
        aggregate.fail_stage(stage, error.kind(), error.to_string(), chrono::Utc::now())?;
        Err(error)
    }

    async fn execute_with_timeout(&self, stage: StageName, ctx: &mut StageIoContext, timeout: Duration) -> Result<(), MediaforgeError> {
        match tokio::time::timeout(timeout, self.stage_executor.execute(stage, ctx)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(MediaforgeError::Timeout(format!("{stage} exceeded {timeout:?}"))),
        }
    }

    /// Builds the composite cache key for `stage`, or `None` when the
    /// stage is ineligible (demux/mux/job-specific encoding) or the
    /// media identity hasn't been computed yet (before stage 01 runs).
    /// `config_subset` is approximated as the job's resolved config
    /// entries namespaced `"{stage}.*"` — the same keys a stage executor
    /// resolves `{stage}.executable_path` and friends against — so
    /// config churn unrelated to this stage never invalidates its cache
    /// entry. `upstream_artifact_hashes` folds in every stage that has
    /// already completed on this job, keyed by stage name, so any
    /// upstream change invalidates downstream cache.
    fn cache_key_for(&self, aggregate: &JobAggregate, stage: StageName) -> Option<CacheKey> {
        if !stage.is_cacheable() {
            return None;
        }
        let media_identity = aggregate.job().media_identity()?;

        let prefix = format!("{stage}.");
        let config_subset: BTreeMap<String, String> = aggregate
            .job()
            .resolved_config()
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(&prefix).map(|stripped| (stripped.to_string(), v.clone())))
            .collect();

        let upstream_artifact_hashes: BTreeMap<String, ContentHash> = aggregate
            .stage_results()
            .iter()
            .filter(|r| r.status().is_successful())
            .map(|r| {
                let combined: Vec<u8> = r.outputs().iter().flat_map(|f| f.content_hash().to_hex().into_bytes()).collect();
                (r.stage_name().to_string(), ContentHash::of_bytes(&combined))
            })
            .collect();

        Some(CacheKeyBuilder::build(stage, media_identity, &config_subset, &upstream_artifact_hashes))
    }

    /// Copies a cache entry's contents into the stage's own directory
    /// (artifacts are always copied, never referenced across the
    /// cache/job-directory boundary) and tracks each as an output so the
    /// stage's manifest is complete even though no executor ran.
    async fn adopt_cache_hit(&self, ctx: &mut StageIoContext, key: &CacheKey) -> Result<(), MediaforgeError> {
        let source_dir = self
            .cache_repository
            .locate(key)
            .await?
            .ok_or_else(|| MediaforgeError::internal_error(format!("cache reported a hit for {key} but locate() found nothing")))?;

        let mut entries = tokio::fs::read_dir(&source_dir)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("reading cache entry {}: {e}", source_dir.display())))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| MediaforgeError::io_error(format!("reading cache entry {}: {e}", source_dir.display())))?
        {
            let file_name = entry.file_name();
            if file_name == "cache_meta.json" {
                continue;
            }
            let destination = ctx.stage_dir.join(&file_name);
            tokio::fs::copy(entry.path(), &destination)
                .await
                .map_err(|e| MediaforgeError::io_error(format!("copying cached artifact {}: {e}", entry.path().display())))?;

            let extension = std::path::Path::new(&file_name).extension().and_then(|e| e.to_str()).unwrap_or("bin").to_string();
            ctx.track_file(
                PathBuf::from(&file_name),
                FileRole::Output,
                LogicalType::new("cached"),
                FileFormat::new(extension),
                None,
                chrono::Utc::now(),
            )
            .await?;
        }
        Ok(())
    }

    /// Actual USD for one stage's execution: billable stages (ASR,
    /// translation, source separation) scale with the job's source
    /// media duration and, for per-target-language stages, the number
    /// of requested targets; everything else is free. A cache hit is
    /// reported separately as a zero-cost event rather than through
    /// this path, since no fresh billable work happened.
    fn cost_for(&self, aggregate: &JobAggregate, stage: StageName) -> f64 {
        let duration_ms = aggregate
            .job()
            .resolved_config()
            .get("media_duration_ms")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        let fan_out = if matches!(stage, StageName::Translate | StageName::SubtitleEncode) {
            aggregate.job().target_languages().len().max(1) as u32
        } else {
            1
        };
        self.cost_rates.estimate_usd(stage, duration_ms, fan_out)
    }

    async fn emit_cost_event(&self, job_id: JobId, stage: StageName, usd: f64) -> Result<(), MediaforgeError> {
        self.cost_event_sink.record(CostEvent {
            job_id,
            stage_name: stage,
            usd,
            occurred_at: chrono::Utc::now(),
        }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mediaforge_domain::entities::Job;
    use mediaforge_domain::value_objects::{LanguageCode, MediaProcessing, StageStatus, UserId, Workflow};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::RwLock;

    struct InMemoryJobRepository {
        aggregates: RwLock<HashMap<JobId, JobAggregate>>,
    }

    #[async_trait]
    impl JobRepository for InMemoryJobRepository {
        async fn save(&self, aggregate: &JobAggregate) -> Result<(), MediaforgeError> {
            self.aggregates.write().await.insert(aggregate.job().job_id(), aggregate.clone());
            Ok(())
        }

        async fn find_by_id(&self, job_id: JobId) -> Result<Option<JobAggregate>, MediaforgeError> {
            Ok(self.aggregates.read().await.get(&job_id).cloned())
        }

        async fn next_sequence(&self, _user_id: UserId, _date: chrono::NaiveDate) -> Result<u32, MediaforgeError> {
            Ok(1)
        }

        async fn list_for_user(&self, _user_id: UserId) -> Result<Vec<JobId>, MediaforgeError> {
            Ok(vec![])
        }
    }

    struct AlwaysSucceedsExecutor {
        calls: Mutex<Vec<StageName>>,
    }

    #[async_trait]
    impl StageExecutorPort for AlwaysSucceedsExecutor {
        async fn execute(&self, stage: StageName, ctx: &mut StageIoContext) -> Result<(), MediaforgeError> {
            self.calls.lock().unwrap().push(stage);
            ctx.result.track_output(mediaforge_domain::entities::TrackedFileRecord::new(
                "out.bin".into(),
                mediaforge_domain::value_objects::FileRole::Output,
                mediaforge_domain::value_objects::LogicalType::new("test"),
                mediaforge_domain::value_objects::FileFormat::new("bin"),
                1,
                mediaforge_domain::value_objects::ContentHash::of_bytes(b"x"),
                chrono::Utc::now(),
                None,
            ));
            Ok(())
        }
    }

    struct AlwaysFailsExecutor;

    #[async_trait]
    impl StageExecutorPort for AlwaysFailsExecutor {
        async fn execute(&self, _stage: StageName, _ctx: &mut StageIoContext) -> Result<(), MediaforgeError> {
            Err(MediaforgeError::subsystem_error("tool crashed"))
        }
    }

    struct NoopCacheRepository;

    #[async_trait]
    impl CacheRepository for NoopCacheRepository {
        async fn contains(&self, _key: &CacheKey) -> Result<bool, MediaforgeError> {
            Ok(false)
        }
        async fn locate(&self, _key: &CacheKey) -> Result<Option<PathBuf>, MediaforgeError> {
            Ok(None)
        }
        async fn commit(&self, _key: &CacheKey, _source_dir: &std::path::Path) -> Result<(), MediaforgeError> {
            Ok(())
        }
        async fn evict(&self, _key: &CacheKey) -> Result<(), MediaforgeError> {
            Ok(())
        }
        async fn total_size_bytes(&self) -> Result<u64, MediaforgeError> {
            Ok(0)
        }
    }

    struct RecordingCostEventSink {
        events: Mutex<Vec<CostEvent>>,
    }

    #[async_trait]
    impl CostEventSink for RecordingCostEventSink {
        async fn record(&self, event: CostEvent) -> Result<(), MediaforgeError> {
            self.events.lock().unwrap().push(event);
            Ok(())
        }
    }

    fn noop_cache() -> Arc<dyn CacheRepository> {
        Arc::new(NoopCacheRepository)
    }

    fn recording_cost_sink() -> Arc<RecordingCostEventSink> {
        Arc::new(RecordingCostEventSink { events: Mutex::new(vec![]) })
    }

    fn sample_aggregate(tmp: &std::path::Path) -> JobAggregate {
        let job_id = JobId::new(chrono::NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), 1, 1);
        let job = Job::new(
            job_id,
            UserId::new(1),
            Workflow::Transcribe,
            LanguageCode::auto(),
            vec![],
            tmp.join("input.mp4"),
            MediaProcessing::Full,
            chrono::Utc::now(),
            HashMap::new(),
        );
        JobAggregate::new(job, chrono::Utc::now())
    }

    #[tokio::test]
    async fn successful_run_completes_every_stage_in_sequence() {
        let tmp = tempfile::tempdir().unwrap();
        let aggregate = sample_aggregate(tmp.path());
        let job_id = aggregate.job().job_id();
        let repo = Arc::new(InMemoryJobRepository {
            aggregates: RwLock::new(HashMap::from([(job_id, aggregate)])),
        });
        let executor = Arc::new(AlwaysSucceedsExecutor { calls: Mutex::new(vec![]) });
        let cost_sink = recording_cost_sink();
        let orchestrator = Orchestrator::new(repo.clone(), executor.clone(), noop_cache(), cost_sink.clone(), tmp.path().to_path_buf());

        orchestrator.run(job_id, false, &[]).await.unwrap();

        let expected = stages_for_workflow(Workflow::Transcribe);
        assert_eq!(*executor.calls.lock().unwrap(), expected);
        assert_eq!(cost_sink.events.lock().unwrap().len(), expected.len());
    }

    #[tokio::test]
    async fn mandatory_stage_failure_stops_the_run() {
        let tmp = tempfile::tempdir().unwrap();
        let aggregate = sample_aggregate(tmp.path());
        let job_id = aggregate.job().job_id();
        let repo = Arc::new(InMemoryJobRepository {
            aggregates: RwLock::new(HashMap::from([(job_id, aggregate)])),
        });
        let executor = Arc::new(AlwaysFailsExecutor);
        let orchestrator = Orchestrator::new(repo, executor, noop_cache(), recording_cost_sink(), tmp.path().to_path_buf());

        let result = orchestrator.run(job_id, false, &[]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn resume_skips_stages_already_recorded_as_successful() {
        let tmp = tempfile::tempdir().unwrap();
        let mut aggregate = sample_aggregate(tmp.path());
        let job_id = aggregate.job().job_id();
        aggregate.start_stage(StageName::Demux, chrono::Utc::now()).unwrap();

        let stage_dir = tmp.path().join(job_id.relative_dir()).join(StageName::Demux.dir_name());
        tokio::fs::create_dir_all(&stage_dir).await.unwrap();
        tokio::fs::write(stage_dir.join("audio.pcm"), b"pcmdata").await.unwrap();
        let mut io_result = StageResult::start(StageName::Demux, chrono::Utc::now());
        io_result.track_output(mediaforge_domain::entities::TrackedFileRecord::new(
            "audio.pcm".into(),
            FileRole::Output,
            LogicalType::new("audio"),
            FileFormat::new("pcm_s16le"),
            7,
            ContentHash::of_bytes(b"pcmdata"),
            chrono::Utc::now(),
            None,
        ));
        aggregate.merge_stage_io(StageName::Demux, &io_result).unwrap();
        aggregate.complete_stage(StageName::Demux, chrono::Utc::now()).unwrap();

        let repo = Arc::new(InMemoryJobRepository {
            aggregates: RwLock::new(HashMap::from([(job_id, aggregate)])),
        });
        let executor = Arc::new(AlwaysSucceedsExecutor { calls: Mutex::new(vec![]) });
        let orchestrator = Orchestrator::new(repo.clone(), executor.clone(), noop_cache(), recording_cost_sink(), tmp.path().to_path_buf());

        orchestrator.run(job_id, true, &[]).await.unwrap();

        assert!(!executor.calls.lock().unwrap().contains(&StageName::Demux));
        let resumed = repo.find_by_id(job_id).await.unwrap().unwrap();
        assert_eq!(resumed.stage_result(StageName::Demux).unwrap().status(), StageStatus::SkippedResume);
    }

    #[tokio::test]
    async fn resume_invalidates_and_reruns_a_stage_whose_output_hash_no_longer_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let mut aggregate = sample_aggregate(tmp.path());
        let job_id = aggregate.job().job_id();
        aggregate.start_stage(StageName::Demux, chrono::Utc::now()).unwrap();

        let stage_dir = tmp.path().join(job_id.relative_dir()).join(StageName::Demux.dir_name());
        tokio::fs::create_dir_all(&stage_dir).await.unwrap();
        tokio::fs::write(stage_dir.join("audio.pcm"), b"changed-since").await.unwrap();
        let mut io_result = StageResult::start(StageName::Demux, chrono::Utc::now());
        io_result.track_output(mediaforge_domain::entities::TrackedFileRecord::new(
            "audio.pcm".into(),
            FileRole::Output,
            LogicalType::new("audio"),
            FileFormat::new("pcm_s16le"),
            7,
            ContentHash::of_bytes(b"pcmdata"),
            chrono::Utc::now(),
            None,
        ));
        aggregate.merge_stage_io(StageName::Demux, &io_result).unwrap();
        aggregate.complete_stage(StageName::Demux, chrono::Utc::now()).unwrap();

        let repo = Arc::new(InMemoryJobRepository {
            aggregates: RwLock::new(HashMap::from([(job_id, aggregate)])),
        });
        let executor = Arc::new(AlwaysSucceedsExecutor { calls: Mutex::new(vec![]) });
        let orchestrator = Orchestrator::new(repo, executor.clone(), noop_cache(), recording_cost_sink(), tmp.path().to_path_buf());

        orchestrator.run(job_id, true, &[]).await.unwrap();

        assert!(executor.calls.lock().unwrap().contains(&StageName::Demux));
    }
}
