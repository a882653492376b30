// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! A minimal logging interface for the bootstrap phase itself — before the
//! application crate's `tracing` subscriber is installed, bootstrap still
//! needs to report CLI parse failures and signal-driven shutdown. Kept
//! trait-based so bootstrap logic is testable without a real subscriber.

pub trait BootstrapLogger: Send + Sync {
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Routes bootstrap log lines through `tracing`, under the `bootstrap`
/// target, so they land in the same sink as the rest of the process once
/// the subscriber is installed.
pub struct ConsoleLogger {
    prefix: String,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::with_prefix("bootstrap")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapLogger for ConsoleLogger {
    fn error(&self, message: &str) {
        tracing::error!(target: "bootstrap", "[{}] {}", self.prefix, message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "bootstrap", "[{}] {}", self.prefix, message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "bootstrap", "[{}] {}", self.prefix, message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "bootstrap", "[{}] {}", self.prefix, message);
    }
}

pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapLogger for NoOpLogger {
    fn error(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}
