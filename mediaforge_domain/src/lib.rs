// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Mediaforge Domain
//!
//! The core business logic of the media transcription/translation/subtitle
//! pipeline, independent of any I/O, subprocess, or persistence technology.
//! Follows Domain-Driven Design: value objects for immutable, self-validating
//! concepts; entities for mutable objects with identity; an aggregate that
//! owns the consistency boundary for one job; domain events raised on state
//! transitions; domain services for stateless cross-cutting logic; and
//! repository ports the application layer implements against concrete
//! infrastructure.
//!
//! ## Module Structure
//!
//! - [`value_objects`]: `JobId`, `Workflow`, `StageName`, `LanguageCode`,
//!   `MediaIdentity`, `PerceptualFingerprint`, `CacheKey`, `ContentHash`, and
//!   the smaller closed enums used throughout.
//! - [`entities`]: `Job`, `StageResult`, `TrackedFileRecord`, `UserProfile`.
//! - [`aggregates`]: `JobAggregate`, the consistency boundary for one job.
//! - [`events`]: `JobEvent` and its variants, raised by the aggregate.
//! - [`services`]: `CacheKeyBuilder`, `FingerprintService`,
//!   `stages_for_workflow`, `WorkflowPolicy`.
//! - [`repositories`]: async trait ports (`JobRepository`,
//!   `CacheRepository`, `UserProfileRepository`, `CostEventSink`,
//!   `MediaDownloadPort`, `MetadataServicePort`).
//! - [`error`]: `MediaforgeError`, the domain-wide error enum.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use aggregates::JobAggregate;
pub use entities::{Job, StageResult, TrackedFileRecord, UserProfile};
pub use error::MediaforgeError;
pub use events::JobEvent;
