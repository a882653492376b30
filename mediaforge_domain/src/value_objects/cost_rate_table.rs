// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Per-stage USD rate table, used by job preparation's a-priori cost
//! estimate and by the cost-event sink to report per-stage spend.
//! Local-processing stages always report a zero-cost event.

use super::StageName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRateTable {
    /// USD per minute of source media duration, per stage. Stages absent
    /// from the map (or mapped to `0.0`) are local-processing and always
    /// report a zero-cost event.
    rates_usd_per_minute: HashMap<String, f64>,
}

impl CostRateTable {
    /// The default table: ASR and translation are billable per external
    /// model-hub usage; source separation has a modest compute surcharge;
    /// everything else (demux, alignment, glossary, hallucination
    /// removal, subtitle encode, mux) runs on local compute and is free.
    pub fn default_table() -> Self {
        let mut rates_usd_per_minute = HashMap::new();
        rates_usd_per_minute.insert(StageName::Asr.as_str().to_string(), 0.006);
        rates_usd_per_minute.insert(StageName::Translate.as_str().to_string(), 0.002);
        rates_usd_per_minute.insert(StageName::SourceSeparate.as_str().to_string(), 0.001);
        rates_usd_per_minute.insert(StageName::MetadataEnrich.as_str().to_string(), 0.0);
        Self { rates_usd_per_minute }
    }

    pub fn rate_for(&self, stage: StageName) -> f64 {
        self.rates_usd_per_minute.get(stage.as_str()).copied().unwrap_or(0.0)
    }

    /// Estimated USD for one stage given `duration_ms` of source media and
    /// a fan-out multiplier (e.g. number of target languages for
    /// translate/subtitle-encode).
    pub fn estimate_usd(&self, stage: StageName, duration_ms: u64, fan_out: u32) -> f64 {
        let minutes = duration_ms as f64 / 60_000.0;
        self.rate_for(stage) * minutes * fan_out.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_processing_stages_are_free() {
        let table = CostRateTable::default_table();
        assert_eq!(table.rate_for(StageName::Demux), 0.0);
        assert_eq!(table.rate_for(StageName::Alignment), 0.0);
    }

    #[test]
    fn billable_stages_scale_with_duration_and_fan_out() {
        let table = CostRateTable::default_table();
        let one_target = table.estimate_usd(StageName::Translate, 600_000, 1);
        let three_targets = table.estimate_usd(StageName::Translate, 600_000, 3);
        assert!((three_targets - one_target * 3.0).abs() < 1e-9);
    }
}
