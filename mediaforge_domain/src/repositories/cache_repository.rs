// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Port for the content-addressable cache: existence/lookup, commit of a
//! freshly computed stage artifact, and eviction. Implementations own the
//! key-scoped locking that guarantees at most one concurrent builder per
//! key — the trait surface itself is not where that guarantee is
//! expressed, since a fake implementation in tests is not expected to be
//! concurrency-safe.

use crate::error::MediaforgeError;
use crate::value_objects::CacheKey;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait CacheRepository: Send + Sync {
    async fn contains(&self, key: &CacheKey) -> Result<bool, MediaforgeError>;

    /// Absolute path to the cached artifact directory, if present.
    async fn locate(&self, key: &CacheKey) -> Result<Option<PathBuf>, MediaforgeError>;

    /// Commits `source_dir`'s contents as the cache entry for `key`. Must
    /// be atomic with respect to concurrent readers: a reader never
    /// observes a partially written entry.
    async fn commit(&self, key: &CacheKey, source_dir: &std::path::Path) -> Result<(), MediaforgeError>;

    async fn evict(&self, key: &CacheKey) -> Result<(), MediaforgeError>;

    /// Total bytes currently held in the cache, for eviction-policy
    /// bookkeeping.
    async fn total_size_bytes(&self) -> Result<u64, MediaforgeError>;
}
