// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! [`StageExecutorPort`] backed by real subprocesses: resolves each
//! stage's executable path through the layered configuration resolver,
//! shells out via [`StageAdapter`], and races the per-stage timeout
//! against the child so a hung external tool cannot block a job
//! forever — on timeout the whole process tree is killed through
//! [`Platform::kill_process_tree`], since a single `Child::kill` only
//! reaches the immediate child and not any helper processes it spawned.
//!
//! A successful exit is not enough on its own: the stage must also have
//! declared its outputs through [`StageOutputManifest`], which this
//! executor tracks onto `ctx` one file at a time. For [`StageName::Demux`]
//! specifically, the declared `audio` output is read back as raw 16-bit
//! PCM and fingerprinted via [`FingerprintService`], giving the
//! orchestrator the job's [`mediaforge_domain::value_objects::MediaIdentity`].

use crate::application::ports::StageExecutorPort;
use crate::application::stage_io::StageIoContext;
use crate::infrastructure::config::LayeredConfigLoader;
use crate::infrastructure::stages::{StageOutputManifest, StageTable};
use async_trait::async_trait;
use mediaforge_bootstrap::Platform;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::services::{FingerprintService, WorkflowPolicy};
use mediaforge_domain::value_objects::StageName;
use std::path::PathBuf;
use std::sync::Arc;

pub struct SubprocessStageExecutor {
    table: StageTable,
    config_loader: LayeredConfigLoader,
    platform: Arc<dyn Platform>,
}

impl SubprocessStageExecutor {
    pub fn new(system_config_path: Option<PathBuf>, platform: Arc<dyn Platform>) -> Self {
        Self {
            table: StageTable::new(),
            config_loader: LayeredConfigLoader::new(system_config_path),
            platform,
        }
    }
}

#[async_trait]
impl StageExecutorPort for SubprocessStageExecutor {
    async fn execute(&self, stage: StageName, ctx: &mut StageIoContext) -> Result<(), MediaforgeError> {
        let layers = self.config_loader.load_layers(&ctx.job_config_overrides, None).await?;
        let resolver = LayeredConfigLoader::resolver(&layers);
        let executable_path = resolver.resolve_or(&format!("{stage}.executable_path"), stage.as_str()).value;

        let adapter = self.table.get(stage);
        let mut command = adapter.command(&executable_path, ctx.job_id, &ctx.job_dir, &ctx.stage_dir);

        let mut child = command
            .spawn()
            .map_err(|e| MediaforgeError::subsystem_error(format!("spawning {executable_path}: {e}")))?;
        let pid = child.id();

        let policy = WorkflowPolicy::policy_for(stage);
        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| MediaforgeError::subsystem_error(format!("waiting on {executable_path}: {e}")))?;
                if !status.success() {
                    return Err(MediaforgeError::AbnormalTermination(format!("{executable_path} exited with {status}")));
                }
            }
            _ = tokio::time::sleep(policy.timeout) => {
                if let Some(pid) = pid {
                    if let Err(e) = self.platform.kill_process_tree(pid) {
                        tracing::warn!(%stage, error = %e, "failed to kill timed-out stage process tree");
                    }
                }
                return Err(MediaforgeError::Timeout(format!("{stage} exceeded {:?} running {executable_path}", policy.timeout)));
            }
        }

        let manifest = StageOutputManifest::read(&ctx.stage_dir).await?;
        let now = chrono::Utc::now();
        for declared in &manifest.outputs {
            ctx.track_file(
                declared.path.clone(),
                declared.role,
                declared.logical_type.clone(),
                declared.format.clone(),
                declared.reason_for_intermediate.clone(),
                now,
            )
            .await?;
        }

        if stage == StageName::Demux {
            let audio = manifest
                .outputs
                .iter()
                .find(|o| o.logical_type.as_str() == "audio")
                .ok_or_else(|| MediaforgeError::AbnormalTermination("demux declared no audio output".to_string()))?;
            let duration_ms = manifest
                .duration_ms
                .ok_or_else(|| MediaforgeError::AbnormalTermination("demux did not report duration_ms".to_string()))?;
            let bytes = tokio::fs::read(ctx.stage_dir.join(&audio.path))
                .await
                .map_err(|e| MediaforgeError::io_error(format!("reading demuxed audio: {e}")))?;
            let samples: Vec<i16> = bytes.chunks_exact(2).map(|c| i16::from_le_bytes([c[0], c[1]])).collect();
            ctx.media_identity = Some(FingerprintService::media_identity(&samples, duration_ms)?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaforge_domain::value_objects::{JobId, UserId};

    struct NoopPlatform;

    impl Platform for NoopPlatform {
        fn cpu_count(&self) -> usize {
            1
        }
        fn temp_dir(&self) -> PathBuf {
            std::env::temp_dir()
        }
        fn platform_name(&self) -> &'static str {
            "test"
        }
        fn kill_process_tree(&self, _pid: u32) -> Result<(), mediaforge_bootstrap::PlatformError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn nonzero_exit_is_reported_as_abnormal_termination() {
        let tmp = tempfile::tempdir().unwrap();
        let executor = SubprocessStageExecutor::new(None, Arc::new(NoopPlatform));
        let job_id = JobId::new(chrono::NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), UserId::new(1).get(), 1);
        let mut ctx = StageIoContext::begin(job_id, StageName::Demux, tmp.path().to_path_buf(), chrono::Utc::now())
            .with_job_config_overrides(std::collections::HashMap::from([("demux.executable_path".to_string(), "false".to_string())]));
        ctx.ensure_stage_dir().await.unwrap();

        let result = executor.execute(StageName::Demux, &mut ctx).await;
        assert!(matches!(result, Err(MediaforgeError::AbnormalTermination(_))));
    }

    #[tokio::test]
    async fn zero_exit_without_a_manifest_is_abnormal_termination() {
        let tmp = tempfile::tempdir().unwrap();
        let executor = SubprocessStageExecutor::new(None, Arc::new(NoopPlatform));
        let job_id = JobId::new(chrono::NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), UserId::new(1).get(), 1);
        let mut ctx = StageIoContext::begin(job_id, StageName::Demux, tmp.path().to_path_buf(), chrono::Utc::now())
            .with_job_config_overrides(std::collections::HashMap::from([("demux.executable_path".to_string(), "true".to_string())]));
        ctx.ensure_stage_dir().await.unwrap();

        let result = executor.execute(StageName::Demux, &mut ctx).await;
        assert!(matches!(result, Err(MediaforgeError::AbnormalTermination(_))));
    }

    #[tokio::test]
    async fn zero_exit_with_a_declared_manifest_tracks_outputs_and_fingerprints_demux() {
        let tmp = tempfile::tempdir().unwrap();
        let executor = SubprocessStageExecutor::new(None, Arc::new(NoopPlatform));
        let job_id = JobId::new(chrono::NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), UserId::new(1).get(), 1);
        let mut ctx = StageIoContext::begin(job_id, StageName::Demux, tmp.path().to_path_buf(), chrono::Utc::now())
            .with_job_config_overrides(std::collections::HashMap::from([("demux.executable_path".to_string(), "true".to_string())]));
        ctx.ensure_stage_dir().await.unwrap();

        tokio::fs::write(ctx.stage_dir.join("audio.pcm"), [0u8, 0, 1, 0, 2, 0, 3, 0]).await.unwrap();
        tokio::fs::write(
            ctx.stage_dir.join(crate::infrastructure::stages::StageOutputManifest::FILE_NAME),
            br#"{"outputs": [{"path": "audio.pcm", "role": "output", "logical_type": "audio", "format": "pcm_s16le"}], "duration_ms": 250}"#,
        )
        .await
        .unwrap();

        let result = executor.execute(StageName::Demux, &mut ctx).await;
        assert!(result.is_ok());
        assert_eq!(ctx.result.outputs().len(), 1);
        assert!(ctx.media_identity.is_some());
    }
}
