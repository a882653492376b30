// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `TrackedFileRecord`: one input/output/intermediate file belonging to a
//! stage.

use crate::value_objects::{ContentHash, FileFormat, FileRole, LogicalType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedFileRecord {
    /// Relative to the owning stage's directory.
    path: PathBuf,
    role: FileRole,
    logical_type: LogicalType,
    format: FileFormat,
    size_bytes: u64,
    content_hash: ContentHash,
    created_at: DateTime<Utc>,
    /// Human-readable justification, required when `role == Intermediate`.
    reason_for_intermediate: Option<String>,
}

impl TrackedFileRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        path: PathBuf,
        role: FileRole,
        logical_type: LogicalType,
        format: FileFormat,
        size_bytes: u64,
        content_hash: ContentHash,
        created_at: DateTime<Utc>,
        reason_for_intermediate: Option<String>,
    ) -> Self {
        Self {
            path,
            role,
            logical_type,
            format,
            size_bytes,
            content_hash,
            created_at,
            reason_for_intermediate,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn role(&self) -> FileRole {
        self.role
    }

    pub fn logical_type(&self) -> &LogicalType {
        &self.logical_type
    }

    pub fn format(&self) -> &FileFormat {
        &self.format
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn content_hash(&self) -> ContentHash {
        self.content_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn reason_for_intermediate(&self) -> Option<&str> {
        self.reason_for_intermediate.as_deref()
    }
}
