// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Job preparation: resolves the input media (downloading and
//! deduplicating remote URLs), validates credentials and budget against
//! the user's profile, computes an a-priori cost estimate, and freezes
//! the result as a new [`JobAggregate`].

use crate::application::ports::DurationProbePort;
use mediaforge_domain::entities::Job;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::repositories::{JobRepository, MediaDownloadPort, UserProfileRepository};
use mediaforge_domain::value_objects::{ContentHash, CostRateTable, JobId, LanguageCode, MediaProcessing, StageName, UserId, Workflow};
use mediaforge_domain::aggregates::JobAggregate;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Raw clip bounds in milliseconds, validated by [`MediaProcessing::clip`].
#[derive(Debug, Clone, Copy)]
pub struct ClipBounds {
    pub start_ms: u64,
    pub end_ms: u64,
}

pub struct JobPreparationRequest {
    pub user_id: UserId,
    pub media: String,
    pub workflow: Workflow,
    pub source_language: LanguageCode,
    pub target_languages: Vec<LanguageCode>,
    pub clip: Option<ClipBounds>,
    pub tmdb_title: Option<String>,
    pub tmdb_year: Option<i32>,
    pub estimate_only: bool,
}

pub struct JobPreparationOutcome {
    pub job_id: JobId,
    pub cost_estimate_usd: f64,
    /// `true` when `--estimate-only` was requested: the estimate was
    /// computed and validated but no job directory was created.
    pub estimate_only: bool,
}

pub struct JobPreparationService {
    job_repository: Arc<dyn JobRepository>,
    user_profile_repository: Arc<dyn UserProfileRepository>,
    media_download: Arc<dyn MediaDownloadPort>,
    duration_probe: Arc<dyn DurationProbePort>,
    downloads_root: PathBuf,
    cost_rates: CostRateTable,
}

impl JobPreparationService {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        user_profile_repository: Arc<dyn UserProfileRepository>,
        media_download: Arc<dyn MediaDownloadPort>,
        duration_probe: Arc<dyn DurationProbePort>,
        downloads_root: PathBuf,
    ) -> Self {
        Self {
            job_repository,
            user_profile_repository,
            media_download,
            duration_probe,
            downloads_root,
            cost_rates: CostRateTable::default_table(),
        }
    }

    pub async fn prepare(&self, request: JobPreparationRequest) -> Result<JobPreparationOutcome, MediaforgeError> {
        let profile = self
            .user_profile_repository
            .find(request.user_id)
            .await?
            .ok_or_else(|| MediaforgeError::CredentialMissing(format!("no profile for user {}", request.user_id.get())))?;
        self.require_credentials(request.workflow, &request.target_languages, |name| profile.credential_ref(name).is_some())?;

        let input_media_path = self.resolve_media(&request.media).await?;

        let media_processing = match request.clip {
            Some(bounds) => MediaProcessing::clip(bounds.start_ms, bounds.end_ms)?,
            None => MediaProcessing::Full,
        };

        let target_languages = LanguageCode::dedup_targets(request.target_languages)?;
        let duration_ms = self.duration_probe.probe_duration_ms(&input_media_path).await?;
        let fan_out = target_languages.len().max(1) as u32;
        let cost_estimate_usd = self.estimate_cost(request.workflow, duration_ms, fan_out);

        if profile.budget().exceeds_cap(cost_estimate_usd) {
            return Err(MediaforgeError::BudgetExceeded(format!(
                "estimated ${cost_estimate_usd:.2} exceeds the configured budget cap"
            )));
        }

        if request.estimate_only {
            let job_id = self.peek_next_job_id(request.user_id).await?;
            return Ok(JobPreparationOutcome {
                job_id,
                cost_estimate_usd,
                estimate_only: true,
            });
        }

        let now = chrono::Utc::now();
        let today = now.date_naive();
        let sequence = self.job_repository.next_sequence(request.user_id, today).await?;
        let job_id = JobId::new(today, request.user_id.get(), sequence);

        let mut resolved_config = HashMap::new();
        resolved_config.insert("cost_estimate_usd".to_string(), cost_estimate_usd.to_string());
        resolved_config.insert("media_duration_ms".to_string(), duration_ms.to_string());
        if let Some(title) = &request.tmdb_title {
            resolved_config.insert("tmdb_enrichment.title".to_string(), title.clone());
        }
        if let Some(year) = request.tmdb_year {
            resolved_config.insert("tmdb_enrichment.year".to_string(), year.to_string());
        }

        let job = Job::new(
            job_id,
            request.user_id,
            request.workflow,
            request.source_language,
            target_languages,
            input_media_path,
            media_processing,
            now,
            resolved_config,
        );
        let aggregate = JobAggregate::new(job, now);
        self.job_repository.save(&aggregate).await?;

        info!(%job_id, cost_estimate_usd, "job prepared");
        Ok(JobPreparationOutcome {
            job_id,
            cost_estimate_usd,
            estimate_only: false,
        })
    }

    /// Resolves `media` to an absolute local path, downloading and
    /// deduplicating remote sources by URL. A repeat `prepare-job` call
    /// for the same URL observes no network I/O: the destination
    /// directory is keyed by a content hash of the URL itself.
    async fn resolve_media(&self, media: &str) -> Result<PathBuf, MediaforgeError> {
        if !media.starts_with("http://") && !media.starts_with("https://") {
            let path = PathBuf::from(media);
            return path
                .canonicalize()
                .map_err(|e| MediaforgeError::ValidationError(format!("input media '{media}' not found: {e}")));
        }

        let url_hash = ContentHash::of_bytes(media.as_bytes()).to_hex();
        let destination_dir = self.downloads_root.join(&url_hash);
        if let Some(existing) = Self::first_entry(&destination_dir).await {
            info!(url = media, "reusing previously downloaded media");
            return Ok(existing);
        }

        tokio::fs::create_dir_all(&destination_dir)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("creating download directory: {e}")))?;
        let (path, _metadata) = self.media_download.download(media, &destination_dir).await?;
        Ok(path)
    }

    async fn first_entry(dir: &Path) -> Option<PathBuf> {
        let mut entries = tokio::fs::read_dir(dir).await.ok()?;
        entries.next_entry().await.ok().flatten().map(|entry| entry.path())
    }

    fn estimate_cost(&self, workflow: Workflow, duration_ms: u64, fan_out: u32) -> f64 {
        StageName::ALL
            .iter()
            .filter(|stage| stages_include(workflow, **stage))
            .map(|stage| {
                let stage_fan_out = if matches!(stage, StageName::Translate | StageName::SubtitleEncode) {
                    fan_out
                } else {
                    1
                };
                self.cost_rates.estimate_usd(*stage, duration_ms, stage_fan_out)
            })
            .sum()
    }

    /// Credential names required for the requested workflow: ASR is
    /// always needed; translation additionally needs a translation-engine
    /// credential whenever at least one target language is requested.
    fn require_credentials(&self, workflow: Workflow, target_languages: &[LanguageCode], has: impl Fn(&str) -> bool) -> Result<(), MediaforgeError> {
        if !has("asr_api_key") {
            return Err(MediaforgeError::CredentialMissing("asr_api_key".into()));
        }
        let needs_translation = matches!(workflow, Workflow::Translate | Workflow::Subtitle) && !target_languages.is_empty();
        if needs_translation && !has("translation_api_key") {
            return Err(MediaforgeError::CredentialMissing("translation_api_key".into()));
        }
        Ok(())
    }

    async fn peek_next_job_id(&self, user_id: UserId) -> Result<JobId, MediaforgeError> {
        let today = chrono::Utc::now().date_naive();
        let sequence = self.job_repository.next_sequence(user_id, today).await?;
        Ok(JobId::new(today, user_id.get(), sequence))
    }
}

fn stages_include(workflow: Workflow, stage: StageName) -> bool {
    mediaforge_domain::services::stages_for_workflow(workflow).contains(&stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mediaforge_domain::entities::{BudgetLimits, UserProfile};
    use mediaforge_domain::repositories::MediaMetadata;
    use std::sync::Mutex;
    use tokio::sync::RwLock;

    struct InMemoryJobRepository {
        aggregates: RwLock<HashMap<JobId, JobAggregate>>,
        next_sequence: Mutex<u32>,
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
            let mut seq = self.next_sequence.lock().unwrap();
            let current = *seq;
            *seq += 1;
            Ok(current)
        }

        async fn list_for_user(&self, _user_id: UserId) -> Result<Vec<JobId>, MediaforgeError> {
            Ok(vec![])
        }
    }

    struct FixedProfileRepository(UserProfile);

    #[async_trait]
    impl UserProfileRepository for FixedProfileRepository {
        async fn find(&self, _user_id: UserId) -> Result<Option<UserProfile>, MediaforgeError> {
            Ok(Some(self.0.clone()))
        }
    }

    struct NoopDownloadPort;

    #[async_trait]
    impl MediaDownloadPort for NoopDownloadPort {
        async fn download(&self, _source_uri: &str, destination_dir: &Path) -> Result<(PathBuf, MediaMetadata), MediaforgeError> {
            let path = destination_dir.join("video.mp4");
            tokio::fs::write(&path, b"fake").await.unwrap();
            Ok((
                path,
                MediaMetadata {
                    content_type: Some("video/mp4".into()),
                    size_bytes: Some(4),
                },
            ))
        }
    }

    struct FixedDurationProbe(u64);

    #[async_trait]
    impl DurationProbePort for FixedDurationProbe {
        async fn probe_duration_ms(&self, _media_path: &Path) -> Result<u64, MediaforgeError> {
            Ok(self.0)
        }
    }

    fn full_credentials() -> HashMap<String, String> {
        HashMap::from([
            ("asr_api_key".to_string(), "ref-1".to_string()),
            ("translation_api_key".to_string(), "ref-2".to_string()),
        ])
    }

    fn service(profile: UserProfile, tmp: &std::path::Path) -> JobPreparationService {
        JobPreparationService::new(
            Arc::new(InMemoryJobRepository {
                aggregates: RwLock::new(HashMap::new()),
                next_sequence: Mutex::new(1),
            }),
            Arc::new(FixedProfileRepository(profile)),
            Arc::new(NoopDownloadPort),
            Arc::new(FixedDurationProbe(60_000)),
            tmp.to_path_buf(),
        )
    }

    fn sample_request(media: String) -> JobPreparationRequest {
        JobPreparationRequest {
            user_id: UserId::new(1),
            media,
            workflow: Workflow::Transcribe,
            source_language: LanguageCode::auto(),
            target_languages: vec![],
            clip: None,
            tmdb_title: None,
            tmdb_year: None,
            estimate_only: false,
        }
    }

    #[tokio::test]
    async fn missing_asr_credential_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("input.mp4");
        tokio::fs::write(&input, b"x").await.unwrap();
        let profile = UserProfile::new(UserId::new(1), HashMap::new(), BudgetLimits::unlimited(), HashMap::new());
        let service = service(profile, tmp.path());

        let result = service.prepare(sample_request(input.display().to_string())).await;
        assert!(matches!(result, Err(MediaforgeError::CredentialMissing(_))));
    }

    #[tokio::test]
    async fn over_budget_estimate_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("input.mp4");
        tokio::fs::write(&input, b"x").await.unwrap();
        let profile = UserProfile::new(
            UserId::new(1),
            full_credentials(),
            BudgetLimits {
                monthly_usd_cap: Some(0.0001),
                alert_threshold_usd: None,
            },
            HashMap::new(),
        );
        let service = service(profile, tmp.path());

        let result = service.prepare(sample_request(input.display().to_string())).await;
        assert!(matches!(result, Err(MediaforgeError::BudgetExceeded(_))));
    }

    #[tokio::test]
    async fn local_media_within_budget_is_prepared() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("input.mp4");
        tokio::fs::write(&input, b"x").await.unwrap();
        let profile = UserProfile::new(UserId::new(1), full_credentials(), BudgetLimits::unlimited(), HashMap::new());
        let service = service(profile, tmp.path());

        let outcome = service.prepare(sample_request(input.display().to_string())).await.unwrap();
        assert!(!outcome.estimate_only);
        assert!(outcome.cost_estimate_usd >= 0.0);
    }

    #[tokio::test]
    async fn repeated_url_download_reuses_destination_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let profile = UserProfile::new(UserId::new(1), full_credentials(), BudgetLimits::unlimited(), HashMap::new());
        let service = service(profile, tmp.path());

        let first = service.resolve_media("https://video.example/watch?v=ABC").await.unwrap();
        let second = service.resolve_media("https://video.example/watch?v=ABC").await.unwrap();
        assert_eq!(first, second);
    }
}
