// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Concrete adapters for every port the application layer depends on:
//! filesystem-backed repositories, the content-addressable cache, the
//! subprocess stage executor and its twelve stage adapters, HTTP clients
//! for the external metadata/download collaborators, and the ambient
//! logging/metrics/configuration machinery.

pub mod cache_service;
pub mod config;
pub mod duration_probe;
pub mod http;
pub mod logging;
pub mod manifest_writer;
pub mod metrics;
pub mod repositories;
pub mod stage_executor;
pub mod stages;

pub use cache_service::FsCacheRepository;
pub use duration_probe::FfprobeDurationProbe;
pub use manifest_writer::ManifestWriter;
pub use metrics::MetricsService;
pub use stage_executor::SubprocessStageExecutor;
