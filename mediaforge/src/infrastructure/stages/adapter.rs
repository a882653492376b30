// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! A single, generic subprocess wrapper shared by all twelve stages. Each
//! external tool is invoked with the same calling convention
//! (`--job-id`, `--job-dir`, `--stage-dir`) and is expected to read/write
//! files under `--stage-dir` the way [`crate::application::stage_io`]
//! tracks them; the stage-specific behavior lives entirely in the
//! external binary, not in this wrapper.

use mediaforge_domain::value_objects::{JobId, StageName};
use std::path::Path;
use tokio::process::Command;

pub struct StageAdapter {
    stage: StageName,
}

impl StageAdapter {
    pub fn new(stage: StageName) -> Self {
        Self { stage }
    }

    pub fn stage(&self) -> StageName {
        self.stage
    }

    /// Builds the command to run `executable_path`, wired to the given
    /// job/stage directories. `kill_on_drop` is set so a future dropped
    /// mid-flight (e.g. by an outer `tokio::time::timeout`) at least
    /// signals the immediate child; tree-wide cleanup on a hard timeout
    /// is the caller's job via [`mediaforge_bootstrap::Platform`].
    pub fn command(&self, executable_path: &str, job_id: JobId, job_dir: &Path, stage_dir: &Path) -> Command {
        let mut command = Command::new(executable_path);
        command
            .arg("--job-id")
            .arg(job_id.to_string())
            .arg("--stage")
            .arg(self.stage.as_str())
            .arg("--job-dir")
            .arg(job_dir)
            .arg("--stage-dir")
            .arg(stage_dir)
            .kill_on_drop(true);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn command_carries_stage_identity_and_directories() {
        let adapter = StageAdapter::new(StageName::Asr);
        let job_id = JobId::new(NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), 1, 1);
        let command = adapter.command("whisper", job_id, Path::new("/jobs/1"), Path::new("/jobs/1/06_asr"));
        let rendered = format!("{:?}", command.as_std());
        assert!(rendered.contains("--stage"));
        assert!(rendered.contains("asr"));
    }
}
