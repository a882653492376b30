// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Process-wide `tracing` setup. One subscriber, installed once at
//! process start: human-readable for an interactive terminal, JSON
//! lines when `json` is requested (e.g. piping into a log aggregator).

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides
/// `default_level` when set; callers pass `verbose` through from the CLI
/// to pick a sane default without requiring the environment variable.
pub fn init(format: LogFormat, verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Human => {
            tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().json().with_env_filter(env_filter).with_target(false).init();
        }
    }
}
