// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Picks a parameter's value out of an ordered stack of [`ConfigLayer`]s.
//! Layers are consulted in the order given — callers are expected to pass
//! them highest-precedence first (job descriptor, then job-local env,
//! then system config, then hard-coded defaults) — and the first layer
//! defining the key wins. Producing the four layers from job.json, an
//! env file, and a config-crate source is an infrastructure concern;
//! this resolver only knows how to pick among layers it is handed.

use crate::value_objects::{ConfigLayer, ResolvedParameter};

pub struct ConfigResolver<'a> {
    layers: &'a [ConfigLayer],
}

impl<'a> ConfigResolver<'a> {
    /// `layers` must already be ordered highest-precedence first.
    pub fn new(layers: &'a [ConfigLayer]) -> Self {
        Self { layers }
    }

    pub fn resolve(&self, key: &str) -> Option<ResolvedParameter> {
        self.layers.iter().find_map(|layer| {
            layer.values.get(key).map(|value| ResolvedParameter {
                key: key.to_string(),
                value: value.clone(),
                source: layer.kind,
            })
        })
    }

    pub fn resolve_or(&self, key: &str, default: &str) -> ResolvedParameter {
        self.resolve(key).unwrap_or_else(|| ResolvedParameter {
            key: key.to_string(),
            value: default.to_string(),
            source: crate::value_objects::ConfigLayerKind::HardCodedDefault,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ConfigLayerKind;
    use std::collections::HashMap;

    fn layer(kind: ConfigLayerKind, pairs: &[(&str, &str)]) -> ConfigLayer {
        ConfigLayer::new(kind, pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn highest_precedence_layer_wins() {
        let layers = vec![
            layer(ConfigLayerKind::JobDescriptor, &[("asr.executable_path", "/job/asr")]),
            layer(ConfigLayerKind::HardCodedDefault, &[("asr.executable_path", "/default/asr")]),
        ];
        let resolved = ConfigResolver::new(&layers).resolve("asr.executable_path").unwrap();
        assert_eq!(resolved.value, "/job/asr");
        assert_eq!(resolved.source, ConfigLayerKind::JobDescriptor);
    }

    #[test]
    fn falls_through_to_lower_layer_when_key_is_absent() {
        let layers = vec![
            layer(ConfigLayerKind::JobDescriptor, &[]),
            layer(ConfigLayerKind::SystemConfig, &[("translate.executable_path", "/sys/translate")]),
        ];
        let resolved = ConfigResolver::new(&layers).resolve("translate.executable_path").unwrap();
        assert_eq!(resolved.source, ConfigLayerKind::SystemConfig);
    }

    #[test]
    fn missing_key_falls_back_to_supplied_default() {
        let layers: Vec<ConfigLayer> = vec![];
        let resolved = ConfigResolver::new(&layers).resolve_or("missing.key", "fallback");
        assert_eq!(resolved.value, "fallback");
        assert_eq!(resolved.source, ConfigLayerKind::HardCodedDefault);
    }

    #[test]
    fn absent_key_resolves_to_none() {
        let layers = vec![layer(ConfigLayerKind::JobDescriptor, &[("other.key", "x")])];
        assert!(ConfigResolver::new(&layers).resolve("asr.executable_path").is_none());
    }
}
