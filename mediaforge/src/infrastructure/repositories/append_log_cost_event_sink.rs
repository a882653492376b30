// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Append-only JSON-lines [`CostEventSink`]: one line per stage
//! execution, `{user_id, job_id, stage, usd, ts}`, opened in append mode
//! so concurrent jobs never clobber each other's records.

use async_trait::async_trait;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::repositories::{CostEvent, CostEventSink};
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Serialize)]
struct CostEventRecord {
    user_id: u64,
    job_id: String,
    stage: String,
    usd: f64,
    ts: chrono::DateTime<chrono::Utc>,
}

pub struct AppendLogCostEventSink {
    log_path: PathBuf,
    write_lock: Mutex<()>,
}

impl AppendLogCostEventSink {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            write_lock: Mutex::new(()),
        }
    }

    fn record_for(event: &CostEvent) -> CostEventRecord {
        CostEventRecord {
            user_id: event.job_id.user_id(),
            job_id: event.job_id.to_string(),
            stage: event.stage_name.to_string(),
            usd: event.usd,
            ts: event.occurred_at,
        }
    }
}

#[async_trait]
impl CostEventSink for AppendLogCostEventSink {
    async fn record(&self, event: CostEvent) -> Result<(), MediaforgeError> {
        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.log_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MediaforgeError::io_error(format!("creating {}: {e}", parent.display())))?;
        }
        let mut line = serde_json::to_vec(&Self::record_for(&event))?;
        line.push(b'\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("opening {}: {e}", self.log_path.display())))?;
        file.write_all(&line)
            .await
            .map_err(|e| MediaforgeError::io_error(format!("appending to {}: {e}", self.log_path.display())))?;
        Ok(())
    }
}
