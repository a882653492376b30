// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Events
//!
//! Events raised by [`crate::aggregates::JobAggregate`] as a job
//! progresses. Collected as "uncommitted events" on the aggregate and
//! drained by the application layer after each state change, for audit
//! logging and for driving the aggregate log / metrics sinks.

mod job_events;

pub use job_events::{
    CacheHitEvent, CacheMissEvent, JobCompletedEvent, JobCreatedEvent, JobEvent, StageCompletedEvent, StageFailedEvent,
    StageSkippedResumeEvent, StageStartedEvent,
};
