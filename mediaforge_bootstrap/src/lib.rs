// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Mediaforge Bootstrap
//!
//! The composition root: CLI argument parsing/validation, signal
//! handling and graceful shutdown, OS platform abstraction, and process
//! exit-code mapping. Deliberately has no dependency on
//! `mediaforge_domain` or `mediaforge` — everything here is the
//! machinery the application layer runs inside of, not the application
//! itself.

pub mod cli;
pub mod exit_code;
pub mod logger;
pub mod platform;
pub mod shutdown;
pub mod signals;

pub use cli::{parse_and_validate, parse_timestamp, ValidatedCli, ValidatedCommand, WorkflowArg};
pub use exit_code::{map_error_to_exit_code, result_to_exit_code, ExitCode};
pub use logger::{BootstrapLogger, ConsoleLogger, NoOpLogger};
pub use platform::{create_platform, Platform, PlatformError};
pub use shutdown::{CancellationToken, ShutdownCoordinator, DEFAULT_GRACE_PERIOD_SECS};
pub use signals::{create_signal_handler, SystemSignals};

/// Parses and validates the process's command-line arguments. The single
/// entry point `main` calls before handing control to the application
/// layer.
pub fn bootstrap_cli() -> Result<ValidatedCli, cli::ParseError> {
    cli::parse_and_validate()
}
