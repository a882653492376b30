// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Mediaforge
//!
//! A deterministic twelve-stage pipeline orchestrator that turns a raw
//! media file into transcripts, translations, and subtitle tracks.
//! Every stage runs as an isolated subprocess, its output is cached by
//! content hash so a failed job resumes from the last completed stage
//! rather than starting over, and every artifact is recorded in an
//! atomically written manifest.
//!
//! ## Layout
//!
//! - [`application`] — orchestration, job preparation, and the
//!   CLI-facing use cases; depends only on `mediaforge_domain` ports.
//! - [`infrastructure`] — concrete adapters for those ports: the
//!   filesystem repositories, the content-addressable cache, the
//!   subprocess stage executor, the HTTP clients, and the ambient
//!   logging/metrics/configuration machinery.
//! - [`presentation`] — dispatches a validated CLI command to a use
//!   case and maps its result onto a process exit code.

pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use mediaforge_domain as domain;
