// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Application layer: the orchestrator, stage I/O context, job
//! preparation, and the two CLI-facing use cases. Depends only on
//! `mediaforge_domain` ports — every concrete adapter lives in
//! [`crate::infrastructure`].

pub mod job_preparation;
pub mod orchestrator;
pub mod ports;
pub mod stage_io;
pub mod use_cases;

pub use job_preparation::{JobPreparationOutcome, JobPreparationRequest, JobPreparationService};
pub use orchestrator::Orchestrator;
pub use ports::{DurationProbePort, StageExecutorPort};
pub use stage_io::StageIoContext;
pub use use_cases::{CacheEvictOutcome, CacheEvictUseCase, PrepareJobError, PrepareJobUseCase, RunPipelineUseCase};
