// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Port over the external media download collaborator (job preparation's
//! fetch of a remote source before the demux stage can run).

use crate::error::MediaforgeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub content_type: Option<String>,
    pub size_bytes: Option<u64>,
}

#[async_trait]
pub trait MediaDownloadPort: Send + Sync {
    /// Downloads `source_uri` into `destination_dir`, returning the path
    /// to the downloaded file and whatever metadata the transport
    /// exposed (e.g. HTTP `Content-Type`/`Content-Length`).
    async fn download(&self, source_uri: &str, destination_dir: &Path) -> Result<(PathBuf, MediaMetadata), MediaforgeError>;
}
