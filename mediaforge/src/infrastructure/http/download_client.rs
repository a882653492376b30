// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! [`MediaDownloadPort`] over plain HTTP(S) `GET`, used by job
//! preparation to pull a remote source media file down before the demux
//! stage can run against it.

use async_trait::async_trait;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::repositories::{MediaDownloadPort, MediaMetadata};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

pub struct HttpDownloadClient {
    client: reqwest::Client,
}

impl HttpDownloadClient {
    pub fn new() -> Result<Self, MediaforgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(600))
            .build()
            .map_err(|e| MediaforgeError::subsystem_error(format!("building HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn destination_file_name(source_uri: &str) -> &str {
        source_uri.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or("source_media")
    }
}

#[async_trait]
impl MediaDownloadPort for HttpDownloadClient {
    async fn download(&self, source_uri: &str, destination_dir: &Path) -> Result<(PathBuf, MediaMetadata), MediaforgeError> {
        let response = self
            .client
            .get(source_uri)
            .send()
            .await
            .map_err(|e| MediaforgeError::TransientExternal(format!("requesting {source_uri}: {e}")))?
            .error_for_status()
            .map_err(|e| MediaforgeError::TransientExternal(format!("{source_uri} returned an error status: {e}")))?;

        let metadata = MediaMetadata {
            content_type: response.headers().get(reqwest::header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_string),
            size_bytes: response.content_length(),
        };

        tokio::fs::create_dir_all(destination_dir)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("creating {}: {e}", destination_dir.display())))?;
        let destination_path = destination_dir.join(Self::destination_file_name(source_uri));

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MediaforgeError::TransientExternal(format!("reading body from {source_uri}: {e}")))?;
        let mut file = tokio::fs::File::create(&destination_path)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("creating {}: {e}", destination_path.display())))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("writing {}: {e}", destination_path.display())))?;

        Ok((destination_path, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_file_name_falls_back_when_path_has_no_segment() {
        assert_eq!(HttpDownloadClient::destination_file_name("https://example.com/a/video.mp4"), "video.mp4");
        assert_eq!(HttpDownloadClient::destination_file_name("https://example.com/"), "source_media");
    }
}
