// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Content-addressable cache backed by plain directories under
//! `cache/<stage>/<prefix>/<hex>/`. Commits are atomic (build into a
//! staging directory, then rename into place); concurrent builders for
//! the same key are serialized through an in-process per-key lock
//! registry, the same `parking_lot`-guarded map pattern the checksum
//! cache in the stage executor runtime uses.

use async_trait::async_trait;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::repositories::CacheRepository;
use mediaforge_domain::value_objects::CacheKey;
use parking_lot::Mutex as SyncMutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

pub struct FsCacheRepository {
    cache_root: PathBuf,
    key_locks: SyncMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl FsCacheRepository {
    pub fn new(cache_root: PathBuf) -> Self {
        Self {
            cache_root,
            key_locks: SyncMutex::new(HashMap::new()),
        }
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_root.join(key.relative_path())
    }

    /// Returns the lock guarding concurrent builders of `key`, creating
    /// one on first use. Entries are never removed from the registry —
    /// it is bounded by the number of distinct keys ever requested in
    /// this process's lifetime, not by cache size.
    fn lock_for(&self, key: &CacheKey) -> Arc<AsyncMutex<()>> {
        let key_string = key.to_string();
        let mut locks = self.key_locks.lock();
        locks.entry(key_string).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
    }

    async fn copy_dir_recursive(source: &Path, destination: &Path) -> Result<(), MediaforgeError> {
        tokio::fs::create_dir_all(destination)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("creating {}: {e}", destination.display())))?;
        let mut entries = tokio::fs::read_dir(source)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("reading {}: {e}", source.display())))?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| MediaforgeError::io_error(e.to_string()))? {
            let target = destination.join(entry.file_name());
            let file_type = entry.file_type().await.map_err(|e| MediaforgeError::io_error(e.to_string()))?;
            if file_type.is_dir() {
                Box::pin(Self::copy_dir_recursive(&entry.path(), &target)).await?;
            } else {
                tokio::fs::copy(entry.path(), &target)
                    .await
                    .map_err(|e| MediaforgeError::io_error(format!("copying {}: {e}", entry.path().display())))?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CacheRepository for FsCacheRepository {
    async fn contains(&self, key: &CacheKey) -> Result<bool, MediaforgeError> {
        Ok(tokio::fs::try_exists(self.entry_path(key)).await.unwrap_or(false))
    }

    async fn locate(&self, key: &CacheKey) -> Result<Option<PathBuf>, MediaforgeError> {
        let path = self.entry_path(key);
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false).then_some(path))
    }

    async fn commit(&self, key: &CacheKey, source_dir: &Path) -> Result<(), MediaforgeError> {
        let lock = self.lock_for(key);
        let _guard = lock.lock().await;

        let final_path = self.entry_path(key);
        if tokio::fs::try_exists(&final_path).await.unwrap_or(false) {
            return Ok(());
        }

        let staging_path = final_path.with_extension("staging");
        if tokio::fs::try_exists(&staging_path).await.unwrap_or(false) {
            tokio::fs::remove_dir_all(&staging_path).await.ok();
        }
        Self::copy_dir_recursive(source_dir, &staging_path).await?;

        if let Some(parent) = final_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MediaforgeError::io_error(format!("creating {}: {e}", parent.display())))?;
        }
        tokio::fs::rename(&staging_path, &final_path)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("committing cache entry: {e}")))?;
        Ok(())
    }

    async fn evict(&self, key: &CacheKey) -> Result<(), MediaforgeError> {
        let lock = self.lock_for(key);
        let _guard = lock.lock().await;
        match tokio::fs::remove_dir_all(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaforgeError::io_error(format!("evicting cache entry: {e}"))),
        }
    }

    async fn total_size_bytes(&self) -> Result<u64, MediaforgeError> {
        Self::dir_size(&self.cache_root).await
    }
}

impl FsCacheRepository {
    async fn dir_size(path: &Path) -> Result<u64, MediaforgeError> {
        let mut total = 0u64;
        let mut stack = vec![path.to_path_buf()];
        while let Some(dir) = stack.pop() {
            let Ok(mut entries) = tokio::fs::read_dir(&dir).await else {
                continue;
            };
            while let Some(entry) = entries.next_entry().await.map_err(|e| MediaforgeError::io_error(e.to_string()))? {
                let metadata = entry.metadata().await.map_err(|e| MediaforgeError::io_error(e.to_string()))?;
                if metadata.is_dir() {
                    stack.push(entry.path());
                } else {
                    total += metadata.len();
                }
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaforge_domain::value_objects::{ContentHash, StageName};

    #[tokio::test]
    async fn commit_then_locate_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("source");
        tokio::fs::create_dir_all(&source).await.unwrap();
        tokio::fs::write(source.join("out.bin"), b"payload").await.unwrap();

        let repo = FsCacheRepository::new(tmp.path().join("cache"));
        let key = CacheKey::new(StageName::Asr, ContentHash::of_bytes(b"x"));

        assert!(!repo.contains(&key).await.unwrap());
        repo.commit(&key, &source).await.unwrap();
        assert!(repo.contains(&key).await.unwrap());

        let located = repo.locate(&key).await.unwrap().unwrap();
        assert!(located.join("out.bin").exists());
    }

    #[tokio::test]
    async fn evicting_an_absent_key_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = FsCacheRepository::new(tmp.path().join("cache"));
        let key = CacheKey::new(StageName::Translate, ContentHash::of_bytes(b"y"));
        assert!(repo.evict(&key).await.is_ok());
    }

    #[tokio::test]
    async fn second_commit_for_same_key_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("source");
        tokio::fs::create_dir_all(&source).await.unwrap();
        tokio::fs::write(source.join("a.bin"), b"1").await.unwrap();

        let repo = FsCacheRepository::new(tmp.path().join("cache"));
        let key = CacheKey::new(StageName::Asr, ContentHash::of_bytes(b"z"));
        repo.commit(&key, &source).await.unwrap();
        repo.commit(&key, &source).await.unwrap();
        assert!(repo.contains(&key).await.unwrap());
    }
}
