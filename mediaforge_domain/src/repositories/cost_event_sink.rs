// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Port for reporting per-stage cost events, one per stage execution
//! regardless of whether the stage was billable — local-processing
//! stages report a zero-cost event so the cost ledger is a complete
//! accounting of every stage that ran.

use crate::error::MediaforgeError;
use crate::value_objects::{JobId, StageName};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEvent {
    pub job_id: JobId,
    pub stage_name: StageName,
    pub usd: f64,
    pub occurred_at: DateTime<Utc>,
}

#[async_trait]
pub trait CostEventSink: Send + Sync {
    async fn record(&self, event: CostEvent) -> Result<(), MediaforgeError>;
}
