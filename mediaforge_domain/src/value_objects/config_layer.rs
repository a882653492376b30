// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Configuration layers and resolution provenance.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One of the four precedence layers consulted by the configuration
/// resolver, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigLayerKind {
    JobDescriptor,
    JobLocalEnv,
    SystemConfig,
    HardCodedDefault,
}

impl std::fmt::Display for ConfigLayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfigLayerKind::JobDescriptor => "job-descriptor",
            ConfigLayerKind::JobLocalEnv => "job-local-env",
            ConfigLayerKind::SystemConfig => "system-config",
            ConfigLayerKind::HardCodedDefault => "hard-coded-default",
        };
        write!(f, "{}", s)
    }
}

/// A flat key/value parameter map attached to a precedence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigLayer {
    pub kind: ConfigLayerKind,
    pub values: HashMap<String, String>,
}

impl Default for ConfigLayerKind {
    fn default() -> Self {
        ConfigLayerKind::HardCodedDefault
    }
}

impl ConfigLayer {
    pub fn new(kind: ConfigLayerKind, values: HashMap<String, String>) -> Self {
        Self { kind, values }
    }
}

/// Where a resolved parameter's value came from — embedded verbatim into
/// the stage's `config_snapshot` so resolver-miss bugs are auditable after
/// the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedParameter {
    pub key: String,
    pub value: String,
    pub source: ConfigLayerKind,
}
