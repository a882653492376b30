// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Process exit codes following Unix conventions (BSD `sysexits.h`), so a
//! shell script driving the pipeline can branch on why a job failed
//! without parsing log output.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    #[default]
    Success = 0,

    /// General error, used when nothing more specific applies.
    Error = 1,

    /// Invalid arguments, unknown flags, missing required arguments.
    UsageError = 64,

    /// Malformed job descriptor, config file, or manifest.
    DataError = 65,

    /// Input media file missing or unreadable.
    NoInput = 66,

    /// Required system/stage configuration missing.
    Config = 78,

    /// A mandatory stage or external tool is unavailable.
    Unavailable = 69,

    /// Unexpected internal error (bug, not an environment problem).
    Software = 70,

    /// Output directory unwritable, disk full, cannot create manifest.
    CantCreate = 73,

    /// Read/write failure against the filesystem.
    IoError = 74,

    /// Transient failure a caller could retry.
    TempFail = 75,

    /// Insufficient privileges or a path escaped its sandbox.
    NoPerm = 77,

    /// Job's monthly cost budget was exceeded.
    BudgetExceeded = 76,

    /// Interrupted by SIGINT (Ctrl+C).
    Interrupted = 130,

    /// Terminated by SIGTERM.
    Terminated = 143,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a domain error's display string to the nearest exit code.
    /// Kept string-based rather than matching on a concrete error type so
    /// this crate stays free of a dependency on the domain crate.
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        let text = error.to_string().to_lowercase();

        if text.contains("containment violation") || text.contains("permission") {
            ExitCode::NoPerm
        } else if text.contains("budget exceeded") {
            ExitCode::BudgetExceeded
        } else if text.contains("config missing") || text.contains("credential missing") {
            ExitCode::Config
        } else if text.contains("job not found") || text.contains("not found") {
            ExitCode::NoInput
        } else if text.contains("validation error") || text.contains("invalid") {
            ExitCode::UsageError
        } else if text.contains("serialization") || text.contains("format") {
            ExitCode::DataError
        } else if text.contains("timeout") || text.contains("transient") {
            ExitCode::TempFail
        } else if text.contains("io error") || text.contains("write") || text.contains("read") {
            ExitCode::IoError
        } else if text.contains("subsystem") || text.contains("abnormal termination") {
            ExitCode::Unavailable
        } else if text.contains("internal error") {
            ExitCode::Software
        } else {
            ExitCode::Error
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "success",
            ExitCode::Error => "general error",
            ExitCode::UsageError => "command line usage error",
            ExitCode::DataError => "data format error",
            ExitCode::NoInput => "cannot open input",
            ExitCode::Config => "configuration error",
            ExitCode::Unavailable => "subsystem unavailable",
            ExitCode::Software => "internal software error",
            ExitCode::CantCreate => "cannot create output",
            ExitCode::IoError => "i/o error",
            ExitCode::TempFail => "temporary failure, retry",
            ExitCode::NoPerm => "permission denied",
            ExitCode::BudgetExceeded => "budget exceeded",
            ExitCode::Interrupted => "interrupted by SIGINT",
            ExitCode::Terminated => "terminated by SIGTERM",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }

    pub fn is_signal(self) -> bool {
        matches!(self, ExitCode::Interrupted | ExitCode::Terminated)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}

/// Converts a job's `Result` into a process exit code, the last step
/// before `main` calls `std::process::exit`.
pub fn result_to_exit_code<T>(result: &Result<T, anyhow::Error>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::Success,
        Err(e) => ExitCode::from_error(e.root_cause()),
    }
}

/// Maps a domain error directly, for callers that already have a concrete
/// `std::error::Error` rather than an `anyhow::Error`.
pub fn map_error_to_exit_code(error: &dyn std::error::Error) -> ExitCode {
    ExitCode::from_error(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values_match_sysexits_conventions() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::Config.as_i32(), 78);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
        assert_eq!(ExitCode::Terminated.as_i32(), 143);
    }

    #[test]
    fn from_error_recognizes_budget_exceeded() {
        let err = anyhow::anyhow!("budget exceeded: monthly cap reached");
        assert_eq!(ExitCode::from_error(err.root_cause()), ExitCode::BudgetExceeded);
    }

    #[test]
    fn from_error_recognizes_containment_violation() {
        let err = anyhow::anyhow!("containment violation: path escaped job directory");
        assert_eq!(ExitCode::from_error(err.root_cause()), ExitCode::NoPerm);
    }

    #[test]
    fn result_to_exit_code_success_path() {
        let ok: Result<(), anyhow::Error> = Ok(());
        assert_eq!(result_to_exit_code(&ok), ExitCode::Success);
    }

    #[test]
    fn is_signal_only_for_interrupt_and_terminate() {
        assert!(ExitCode::Interrupted.is_signal());
        assert!(ExitCode::Terminated.is_signal());
        assert!(!ExitCode::Error.is_signal());
    }
}
