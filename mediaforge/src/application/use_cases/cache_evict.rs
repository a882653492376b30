// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `cache-evict`: removes specific cache entries, or reports the total
//! cache size when no keys are given (a dry-run-flavored default, since
//! evicting the entire cache on an empty `--keys` would surprise an
//! operator who just wanted to check usage).

use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::repositories::CacheRepository;
use mediaforge_domain::value_objects::CacheKey;
use std::sync::Arc;

pub struct CacheEvictUseCase {
    cache_repository: Arc<dyn CacheRepository>,
}

pub struct CacheEvictOutcome {
    pub evicted_keys: Vec<String>,
    pub total_size_bytes: u64,
}

impl CacheEvictUseCase {
    pub fn new(cache_repository: Arc<dyn CacheRepository>) -> Self {
        Self { cache_repository }
    }

    pub async fn execute(&self, keys: &[String]) -> Result<CacheEvictOutcome, MediaforgeError> {
        let mut evicted_keys = Vec::with_capacity(keys.len());
        for raw_key in keys {
            let key = CacheKey::parse(raw_key)?;
            self.cache_repository.evict(&key).await?;
            evicted_keys.push(raw_key.clone());
        }
        let total_size_bytes = self.cache_repository.total_size_bytes().await?;
        Ok(CacheEvictOutcome { evicted_keys, total_size_bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mediaforge_domain::value_objects::{ContentHash, StageName};
    use std::path::{Path, PathBuf};
    use tokio::sync::Mutex;

    struct RecordingCacheRepository {
        evicted: Mutex<Vec<CacheKey>>,
    }

    #[async_trait]
    impl CacheRepository for RecordingCacheRepository {
        async fn contains(&self, _key: &CacheKey) -> Result<bool, MediaforgeError> {
            Ok(false)
        }
        async fn locate(&self, _key: &CacheKey) -> Result<Option<PathBuf>, MediaforgeError> {
            Ok(None)
        }
        async fn commit(&self, _key: &CacheKey, _source_dir: &Path) -> Result<(), MediaforgeError> {
            Ok(())
        }
        async fn evict(&self, key: &CacheKey) -> Result<(), MediaforgeError> {
            self.evicted.lock().await.push(*key);
            Ok(())
        }
        async fn total_size_bytes(&self) -> Result<u64, MediaforgeError> {
            Ok(1024)
        }
    }

    #[tokio::test]
    async fn evicts_every_parsed_key() {
        let repo = Arc::new(RecordingCacheRepository { evicted: Mutex::new(vec![]) });
        let use_case = CacheEvictUseCase::new(repo.clone());
        let key = CacheKey::new(StageName::Asr, ContentHash::of_bytes(b"x"));

        let outcome = use_case.execute(&[key.to_string()]).await.unwrap();
        assert_eq!(outcome.evicted_keys, vec![key.to_string()]);
        assert_eq!(outcome.total_size_bytes, 1024);
        assert_eq!(repo.evicted.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn malformed_key_is_rejected() {
        let repo = Arc::new(RecordingCacheRepository { evicted: Mutex::new(vec![]) });
        let use_case = CacheEvictUseCase::new(repo);
        assert!(use_case.execute(&["not-a-key".to_string()]).await.is_err());
    }
}
