// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The one handshake between an external stage subprocess and the
//! tracked-output bookkeeping [`crate::application::stage_io::StageIoContext`]
//! enforces: before exiting zero, a stage writes `stage_outputs.json`
//! into its own stage directory, declaring every file it produced.
//! `FileRole`/`LogicalType`/`FileFormat` already derive `Deserialize`, so
//! this is a direct `serde_json` parse with no translation layer.

use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::value_objects::{FileFormat, FileRole, LogicalType};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct DeclaredOutput {
    /// Relative to the stage's own directory.
    pub path: PathBuf,
    pub role: FileRole,
    pub logical_type: LogicalType,
    pub format: FileFormat,
    #[serde(default)]
    pub reason_for_intermediate: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StageOutputManifest {
    pub outputs: Vec<DeclaredOutput>,
    /// Populated only by the demux stage: the exact decoded duration of
    /// the PCM stream its `audio`-logical-type output contains, needed
    /// to compute the job's media identity.
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl StageOutputManifest {
    pub const FILE_NAME: &'static str = "stage_outputs.json";

    /// Reads and validates `{stage_dir}/stage_outputs.json`. A missing
    /// file, malformed JSON, or a manifest declaring zero outputs are all
    /// treated as the subprocess having terminated abnormally — a tool
    /// that exits zero without producing anything is not a success.
    pub async fn read(stage_dir: &Path) -> Result<Self, MediaforgeError> {
        let path = stage_dir.join(Self::FILE_NAME);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| MediaforgeError::AbnormalTermination(format!("stage did not write {}: {e}", path.display())))?;
        let manifest: Self = serde_json::from_slice(&bytes)
            .map_err(|e| MediaforgeError::AbnormalTermination(format!("parsing {}: {e}", path.display())))?;
        if manifest.outputs.is_empty() {
            return Err(MediaforgeError::AbnormalTermination(format!("{} declared zero outputs", path.display())));
        }
        Ok(manifest)
    }
}
