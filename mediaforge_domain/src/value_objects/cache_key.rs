// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Cache Key Value Object
//!
//! `cache_key = hash(stage_name, media_identity, config_subset,
//! upstream_artifact_hashes)`. Construction is delegated to
//! [`crate::services::cache_key_builder`] (which enumerates the
//! stage-specific `config_subset`); this module only owns the resulting
//! immutable key type and its on-disk path layout
//! (`cache/<stage_name>/<hex-prefix-2>/<full-hex-key>/`).

use super::{ContentHash, StageName};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    stage: StageName,
    hash: ContentHash,
}

impl CacheKey {
    pub fn new(stage: StageName, hash: ContentHash) -> Self {
        Self { stage, hash }
    }

    /// Inverse of [`CacheKey::fmt`]'s `"{stage}:{hash}"` rendering, for
    /// CLI commands that take a cache key back as a string (e.g. a
    /// targeted cache eviction).
    pub fn parse(s: &str) -> Result<Self, crate::error::MediaforgeError> {
        let (stage, hash) = s
            .split_once(':')
            .ok_or_else(|| crate::error::MediaforgeError::ValidationError(format!("malformed cache key: {s}")))?;
        Ok(Self {
            stage: stage.parse()?,
            hash: ContentHash::from_hex(hash)?,
        })
    }

    pub fn stage(&self) -> StageName {
        self.stage
    }

    pub fn hash(&self) -> ContentHash {
        self.hash
    }

    /// Relative path under the cache root: `<stage_name>/<prefix-2>/<full-hex>`.
    pub fn relative_path(&self) -> std::path::PathBuf {
        let hex = self.hash.to_hex();
        let prefix = &hex[..2.min(hex.len())];
        std::path::PathBuf::from(self.stage.as_str()).join(prefix).join(hex)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stage, self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_nests_by_two_hex_prefix() {
        let key = CacheKey::new(StageName::Asr, ContentHash::of_bytes(b"x"));
        let path = key.relative_path();
        let hex = key.hash().to_hex();
        assert_eq!(path, std::path::PathBuf::from("asr").join(&hex[..2]).join(&hex));
    }

    #[test]
    fn parse_is_the_inverse_of_display() {
        let key = CacheKey::new(StageName::Translate, ContentHash::of_bytes(b"y"));
        assert_eq!(CacheKey::parse(&key.to_string()).unwrap(), key);
    }

    #[test]
    fn parse_rejects_a_key_with_no_separator() {
        assert!(CacheKey::parse("not-a-cache-key").is_err());
    }
}
