// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! POSIX implementation of [`Platform`](super::Platform): kills a process
//! group via `libc::killpg` rather than a single `kill`, since stage
//! subprocesses are spawned in their own session (see the subprocess
//! executor) so the whole group can be reaped at once.

use super::{Platform, PlatformError};
use std::path::PathBuf;

pub struct UnixPlatform;

impl UnixPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnixPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for UnixPlatform {
    fn cpu_count(&self) -> usize {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }

    fn platform_name(&self) -> &'static str {
        if cfg!(target_os = "macos") {
            "macos"
        } else {
            "linux"
        }
    }

    fn kill_process_tree(&self, pid: u32) -> Result<(), PlatformError> {
        // A negative pid targets the whole process group in killpg's
        // sibling `kill(2)`; killpg itself takes the group id directly.
        let result = unsafe { libc::killpg(pid as libc::pid_t, libc::SIGKILL) };
        if result != 0 {
            let err = std::io::Error::last_os_error();
            // ESRCH just means the group already exited.
            if err.raw_os_error() == Some(libc::ESRCH) {
                return Ok(());
            }
            return Err(PlatformError::Io(err));
        }
        Ok(())
    }
}
