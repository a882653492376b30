// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Platform abstraction for the handful of OS-specific operations the
//! bootstrap layer needs: CPU parallelism hints, the system temp
//! directory, and killing a stage subprocess's entire process group when
//! its timeout elapses (a child tool may itself spawn helpers, and a
//! single `child.kill()` only signals the immediate child).
//!
//! This sits outside the domain/application layers so platform-specific
//! APIs stay isolated to one module, selected at compile time via `cfg`.

use std::path::PathBuf;
use thiserror::Error;

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixPlatform;

#[cfg(windows)]
pub use windows::WindowsPlatform;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not supported on this platform: {0}")]
    NotSupported(String),

    #[error("platform error: {0}")]
    Other(String),
}

/// OS-specific operations the bootstrap layer performs directly, without
/// conditional compilation scattered through the application crate.
pub trait Platform: Send + Sync {
    /// Logical CPU count, used to size the default worker pool when the
    /// CLI does not override it.
    fn cpu_count(&self) -> usize;

    /// Directory for scratch files: per-stage temp inputs before they are
    /// tracked into the job's manifest.
    fn temp_dir(&self) -> PathBuf;

    fn platform_name(&self) -> &'static str;

    /// Terminates `pid` and every process it spawned. Used when a stage
    /// subprocess exceeds its timeout and may have spawned helper
    /// processes (e.g. a shell wrapper around an external tool).
    fn kill_process_tree(&self, pid: u32) -> Result<(), PlatformError>;
}

pub fn create_platform() -> Box<dyn Platform> {
    #[cfg(unix)]
    {
        Box::new(UnixPlatform::new())
    }

    #[cfg(windows)]
    {
        Box::new(WindowsPlatform::new())
    }

    #[cfg(not(any(unix, windows)))]
    {
        compile_error!("unsupported platform");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_platform_reports_at_least_one_cpu() {
        let platform = create_platform();
        assert!(platform.cpu_count() >= 1);
    }

    #[test]
    fn create_platform_reports_a_temp_dir() {
        let platform = create_platform();
        assert!(!platform.temp_dir().as_os_str().is_empty());
    }
}
