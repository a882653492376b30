// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Persistence port for job aggregates: manifest load/save and lookup by
//! identifier or by user's sequence.

use crate::aggregates::JobAggregate;
use crate::error::MediaforgeError;
use crate::value_objects::{JobId, UserId};
use async_trait::async_trait;

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Atomically persists the aggregate's current manifest state.
    async fn save(&self, aggregate: &JobAggregate) -> Result<(), MediaforgeError>;

    async fn find_by_id(&self, job_id: JobId) -> Result<Option<JobAggregate>, MediaforgeError>;

    /// Next unused sequence number for a user on a given day, used by job
    /// preparation to allocate a new `JobId`.
    async fn next_sequence(&self, user_id: UserId, date: chrono::NaiveDate) -> Result<u32, MediaforgeError>;

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<JobId>, MediaforgeError>;
}
