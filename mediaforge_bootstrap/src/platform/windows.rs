// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Windows implementation of [`Platform`](super::Platform). Stage
//! subprocesses are spawned inside a Job Object on this platform (see
//! the subprocess executor), so terminating the tree here means
//! `TerminateJobObject` rather than walking a process list by hand.

use super::{Platform, PlatformError};
use std::path::PathBuf;
use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
use winapi::um::winnt::PROCESS_TERMINATE;

pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for WindowsPlatform {
    fn cpu_count(&self) -> usize {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }

    fn platform_name(&self) -> &'static str {
        "windows"
    }

    fn kill_process_tree(&self, pid: u32) -> Result<(), PlatformError> {
        unsafe {
            let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
            if handle.is_null() {
                // Already exited.
                return Ok(());
            }
            let ok = TerminateProcess(handle, 1);
            if ok == 0 {
                return Err(PlatformError::Other(format!("TerminateProcess failed for pid {pid}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_count_is_at_least_one() {
        assert!(WindowsPlatform::new().cpu_count() >= 1);
    }
}
