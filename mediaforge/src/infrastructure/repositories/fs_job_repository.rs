// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Filesystem-backed [`JobRepository`]: one `job.json` per job directory,
//! written atomically via [`ManifestWriter`]. Sequence allocation races
//! are resolved by `create_new` on the candidate sequence directory, the
//! direct filesystem analogue of a unique-constraint insert.

use crate::infrastructure::manifest_writer::ManifestWriter;
use async_trait::async_trait;
use mediaforge_domain::aggregates::JobAggregate;
use mediaforge_domain::entities::{Job, StageResult};
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::repositories::JobRepository;
use mediaforge_domain::value_objects::{JobId, UserId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct JobManifest {
    job: Job,
    stage_results: Vec<StageResult>,
}

pub struct FsJobRepository {
    jobs_root: PathBuf,
}

impl FsJobRepository {
    pub fn new(jobs_root: PathBuf) -> Self {
        Self { jobs_root }
    }

    fn manifest_path(&self, job_id: JobId) -> PathBuf {
        self.jobs_root.join(job_id.relative_dir()).join("job.json")
    }

    fn user_day_dir(&self, user_id: UserId, date: chrono::NaiveDate) -> PathBuf {
        use chrono::Datelike;
        self.jobs_root
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
            .join(format!("{:02}", date.day()))
            .join(user_id.get().to_string())
    }
}

#[async_trait]
impl JobRepository for FsJobRepository {
    async fn save(&self, aggregate: &JobAggregate) -> Result<(), MediaforgeError> {
        let manifest = JobManifest {
            job: aggregate.job().clone(),
            stage_results: aggregate.stage_results().to_vec(),
        };
        ManifestWriter::write_json(&self.manifest_path(aggregate.job().job_id()), &manifest).await
    }

    async fn find_by_id(&self, job_id: JobId) -> Result<Option<JobAggregate>, MediaforgeError> {
        let manifest: Option<JobManifest> = ManifestWriter::read_json(&self.manifest_path(job_id)).await?;
        Ok(manifest.map(|m| JobAggregate::rehydrate(m.job, m.stage_results)))
    }

    async fn next_sequence(&self, user_id: UserId, date: chrono::NaiveDate) -> Result<u32, MediaforgeError> {
        let day_dir = self.user_day_dir(user_id, date);
        tokio::fs::create_dir_all(&day_dir)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("creating {}: {e}", day_dir.display())))?;

        for candidate in 1u32.. {
            let candidate_dir = day_dir.join(candidate.to_string());
            match tokio::fs::create_dir(&candidate_dir).await {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(MediaforgeError::io_error(format!("allocating sequence dir: {e}"))),
            }
        }
        unreachable!("u32 sequence space exhausted")
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<JobId>, MediaforgeError> {
        let mut job_ids = Vec::new();
        let mut year_entries = match tokio::fs::read_dir(&self.jobs_root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(job_ids),
            Err(e) => return Err(MediaforgeError::io_error(e.to_string())),
        };
        while let Some(year_entry) = year_entries.next_entry().await.map_err(|e| MediaforgeError::io_error(e.to_string()))? {
            let mut month_entries = tokio::fs::read_dir(year_entry.path()).await.map_err(|e| MediaforgeError::io_error(e.to_string()))?;
            while let Some(month_entry) = month_entries.next_entry().await.map_err(|e| MediaforgeError::io_error(e.to_string()))? {
                let mut day_entries = tokio::fs::read_dir(month_entry.path()).await.map_err(|e| MediaforgeError::io_error(e.to_string()))?;
                while let Some(day_entry) = day_entries.next_entry().await.map_err(|e| MediaforgeError::io_error(e.to_string()))? {
                    let user_dir = day_entry.path().join(user_id.get().to_string());
                    let Ok(mut seq_entries) = tokio::fs::read_dir(&user_dir).await else {
                        continue;
                    };
                    while let Some(seq_entry) = seq_entries.next_entry().await.map_err(|e| MediaforgeError::io_error(e.to_string()))? {
                        if seq_entry.path().join("job.json").exists() {
                            let relative = seq_entry.path().strip_prefix(&self.jobs_root).unwrap().to_string_lossy().replace('\\', "/");
                            if let Ok(job_id) = JobId::parse(&relative) {
                                job_ids.push(job_id);
                            }
                        }
                    }
                }
            }
        }
        Ok(job_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mediaforge_domain::value_objects::{LanguageCode, MediaProcessing, Workflow};
    use std::collections::HashMap;

    fn sample_job(job_id: JobId) -> Job {
        Job::new(
            job_id,
            UserId::new(1),
            Workflow::Transcribe,
            LanguageCode::auto(),
            vec![],
            "input.mp4".into(),
            MediaProcessing::Full,
            chrono::Utc::now(),
            HashMap::new(),
        )
    }

    #[tokio::test]
    async fn save_and_find_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = FsJobRepository::new(tmp.path().to_path_buf());
        let job_id = JobId::new(NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), 1, 1);
        let aggregate = JobAggregate::new(sample_job(job_id), chrono::Utc::now());

        repo.save(&aggregate).await.unwrap();
        let loaded = repo.find_by_id(job_id).await.unwrap().unwrap();
        assert_eq!(loaded.job().job_id(), job_id);
    }

    #[tokio::test]
    async fn missing_job_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = FsJobRepository::new(tmp.path().to_path_buf());
        let job_id = JobId::new(NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), 1, 99);
        assert!(repo.find_by_id(job_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn next_sequence_never_repeats_for_same_user_and_day() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = FsJobRepository::new(tmp.path().to_path_buf());
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let first = repo.next_sequence(UserId::new(1), date).await.unwrap();
        let second = repo.next_sequence(UserId::new(1), date).await.unwrap();
        assert_ne!(first, second);
    }
}
