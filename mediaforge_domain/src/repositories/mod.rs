// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Repository Ports
//!
//! Async trait interfaces the domain depends on but does not implement.
//! Infrastructure provides concrete adapters (filesystem-backed, HTTP
//! clients, etc.); the domain and application layers depend only on these
//! traits, never on a concrete adapter type.

mod cache_repository;
mod cost_event_sink;
mod job_repository;
mod media_download_port;
mod metadata_service_port;
mod user_profile_repository;

pub use cache_repository::CacheRepository;
pub use cost_event_sink::{CostEvent, CostEventSink};
pub use job_repository::JobRepository;
pub use media_download_port::{MediaDownloadPort, MediaMetadata};
pub use metadata_service_port::{GlossaryTerm, MetadataServicePort};
pub use user_profile_repository::UserProfileRepository;
