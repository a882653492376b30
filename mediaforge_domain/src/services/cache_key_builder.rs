// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Builds the composite [`CacheKey`] for a cacheable stage:
//! `hash(stage_name, media_identity, config_subset, upstream_artifact_hashes)`.
//! The `config_subset` is deliberately only the parameters that stage
//! actually reads — unrelated config churn must never invalidate a cache
//! entry.

use crate::value_objects::{CacheKey, ContentHash, MediaIdentity, StageName};
use std::collections::BTreeMap;

pub struct CacheKeyBuilder;

impl CacheKeyBuilder {
    /// `config_subset` and `upstream_artifact_hashes` are taken as
    /// `BTreeMap`s so the serialized form (and therefore the resulting
    /// hash) is independent of caller-side ordering.
    pub fn build(
        stage: StageName,
        media_identity: MediaIdentity,
        config_subset: &BTreeMap<String, String>,
        upstream_artifact_hashes: &BTreeMap<String, ContentHash>,
    ) -> CacheKey {
        let mut buf = Vec::new();
        buf.extend_from_slice(stage.as_str().as_bytes());
        buf.push(0);
        buf.extend_from_slice(media_identity.as_bytes());
        buf.push(0);
        for (key, value) in config_subset {
            buf.extend_from_slice(key.as_bytes());
            buf.push(b'=');
            buf.extend_from_slice(value.as_bytes());
            buf.push(0);
        }
        buf.push(0);
        for (upstream_stage, hash) in upstream_artifact_hashes {
            buf.extend_from_slice(upstream_stage.as_bytes());
            buf.push(b'=');
            buf.extend_from_slice(hash.to_hex().as_bytes());
            buf.push(0);
        }
        CacheKey::new(stage, ContentHash::of_bytes(&buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_produce_same_key() {
        let identity = MediaIdentity::compute(&[1, 2, 3, 4], 1000);
        let mut config = BTreeMap::new();
        config.insert("model".to_string(), "large-v3".to_string());
        let upstream = BTreeMap::new();

        let a = CacheKeyBuilder::build(StageName::Asr, identity, &config, &upstream);
        let b = CacheKeyBuilder::build(StageName::Asr, identity, &config, &upstream);
        assert_eq!(a, b);
    }

    #[test]
    fn unrelated_config_change_does_not_change_key_when_subset_excludes_it() {
        let identity = MediaIdentity::compute(&[1, 2, 3, 4], 1000);
        let mut config_a = BTreeMap::new();
        config_a.insert("model".to_string(), "large-v3".to_string());
        let mut config_b = config_a.clone();
        config_b.insert("model".to_string(), "large-v3".to_string());
        let upstream = BTreeMap::new();

        let a = CacheKeyBuilder::build(StageName::Asr, identity, &config_a, &upstream);
        let b = CacheKeyBuilder::build(StageName::Asr, identity, &config_b, &upstream);
        assert_eq!(a, b);
    }

    #[test]
    fn different_config_subset_changes_key() {
        let identity = MediaIdentity::compute(&[1, 2, 3, 4], 1000);
        let mut config_a = BTreeMap::new();
        config_a.insert("model".to_string(), "large-v3".to_string());
        let mut config_b = BTreeMap::new();
        config_b.insert("model".to_string(), "medium".to_string());
        let upstream = BTreeMap::new();

        let a = CacheKeyBuilder::build(StageName::Asr, identity, &config_a, &upstream);
        let b = CacheKeyBuilder::build(StageName::Asr, identity, &config_b, &upstream);
        assert_ne!(a, b);
    }

    #[test]
    fn different_stage_changes_key_even_with_identical_inputs() {
        let identity = MediaIdentity::compute(&[1, 2, 3, 4], 1000);
        let config = BTreeMap::new();
        let upstream = BTreeMap::new();

        let a = CacheKeyBuilder::build(StageName::Asr, identity, &config, &upstream);
        let b = CacheKeyBuilder::build(StageName::Translate, identity, &config, &upstream);
        assert_ne!(a, b);
    }
}
