// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Atomic JSON persistence: writes to a sibling `.tmp` path, syncs it to
//! disk, then renames over the final path so a reader never observes a
//! partially written manifest.

use mediaforge_domain::error::MediaforgeError;
use serde::Serialize;
use std::path::Path;

pub struct ManifestWriter;

impl ManifestWriter {
    pub async fn write_json<T: Serialize + Sync>(path: &Path, value: &T) -> Result<(), MediaforgeError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MediaforgeError::io_error(format!("creating {}: {e}", parent.display())))?;
        }

        let body = serde_json::to_vec_pretty(value)?;
        let tmp_path = Self::tmp_path(path);

        let file = tokio::fs::File::create(&tmp_path)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("creating {}: {e}", tmp_path.display())))?;
        {
            use tokio::io::AsyncWriteExt;
            let mut file = file;
            file.write_all(&body)
                .await
                .map_err(|e| MediaforgeError::io_error(format!("writing {}: {e}", tmp_path.display())))?;
            file.sync_all()
                .await
                .map_err(|e| MediaforgeError::io_error(format!("syncing {}: {e}", tmp_path.display())))?;
        }

        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("committing {}: {e}", path.display())))?;
        Ok(())
    }

    pub async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, MediaforgeError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MediaforgeError::io_error(format!("reading {}: {e}", path.display()))),
        }
    }

    fn tmp_path(path: &Path) -> std::path::PathBuf {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        std::path::PathBuf::from(tmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        value: u32,
    }

    #[tokio::test]
    async fn round_trips_through_atomic_write() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("manifest.json");
        ManifestWriter::write_json(&path, &Sample { value: 7 }).await.unwrap();

        assert!(!ManifestWriter::tmp_path(&path).exists());
        let loaded: Sample = ManifestWriter::read_json(&path).await.unwrap().unwrap();
        assert_eq!(loaded, Sample { value: 7 });
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent.json");
        let loaded: Option<Sample> = ManifestWriter::read_json(&path).await.unwrap();
        assert!(loaded.is_none());
    }
}
