// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! [`DurationProbePort`] via `ffprobe`, used only at job-preparation time
//! to estimate cost before demux has produced the canonical PCM stream
//! (and with it, the exact duration [`mediaforge_domain::value_objects::MediaIdentity`]
//! is computed from).

use crate::application::ports::DurationProbePort;
use async_trait::async_trait;
use mediaforge_domain::error::MediaforgeError;
use std::path::Path;
use tokio::process::Command;

pub struct FfprobeDurationProbe {
    executable_path: String,
}

impl FfprobeDurationProbe {
    pub fn new(executable_path: impl Into<String>) -> Self {
        Self { executable_path: executable_path.into() }
    }
}

impl Default for FfprobeDurationProbe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl DurationProbePort for FfprobeDurationProbe {
    async fn probe_duration_ms(&self, media_path: &Path) -> Result<u64, MediaforgeError> {
        let output = Command::new(&self.executable_path)
            .arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("default=noprint_wrappers=1:nokey=1")
            .arg(media_path)
            .output()
            .await
            .map_err(|e| MediaforgeError::subsystem_error(format!("running {}: {e}", self.executable_path)))?;

        if !output.status.success() {
            return Err(MediaforgeError::subsystem_error(format!(
                "{} exited with {}: {}",
                self.executable_path,
                output.status,
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let seconds: f64 = stdout
            .trim()
            .parse()
            .map_err(|e| MediaforgeError::subsystem_error(format!("parsing duration {stdout:?}: {e}")))?;
        Ok((seconds * 1000.0).round() as u64)
    }
}
