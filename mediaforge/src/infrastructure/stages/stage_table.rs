// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Registry of one [`StageAdapter`] per [`StageName`], built once and
//! shared across every job the process runs.

use super::adapter::StageAdapter;
use mediaforge_domain::value_objects::StageName;
use std::collections::HashMap;

pub struct StageTable {
    adapters: HashMap<StageName, StageAdapter>,
}

impl StageTable {
    pub fn new() -> Self {
        let adapters = StageName::ALL.into_iter().map(|stage| (stage, StageAdapter::new(stage))).collect();
        Self { adapters }
    }

    pub fn get(&self, stage: StageName) -> &StageAdapter {
        self.adapters.get(&stage).expect("StageTable is populated for every StageName at construction")
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stage_has_an_adapter() {
        let table = StageTable::new();
        for stage in StageName::ALL {
            assert_eq!(table.get(stage).stage(), stage);
        }
    }
}
