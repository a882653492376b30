// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Filesystem-backed implementations of the domain's persistence ports.

pub mod append_log_cost_event_sink;
pub mod fs_job_repository;
pub mod fs_user_profile_repository;

pub use append_log_cost_event_sink::AppendLogCostEventSink;
pub use fs_job_repository::FsJobRepository;
pub use fs_user_profile_repository::FsUserProfileRepository;
