// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Identifier Value Object
//!
//! `JobId` encodes the output directory layout directly:
//! `out/YYYY/MM/DD/<user_id>/<seq>/`. Unlike the other identifiers in this
//! crate (see [`super::generic_id`]), a job id is not a ULID — jobs need to
//! be sortable and unique per user per day, which a random/ULID id cannot
//! guarantee without a lookup. A `JobId` is therefore a plain tuple of
//! `(date, user_id, sequence)` with a lexicographically sortable string
//! form equal to its directory path.

use crate::error::MediaforgeError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one job: the day it was created, the owning user, and a
/// per-user-per-day sequence number assigned at job-prep time.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct JobId {
    date: NaiveDate,
    user_id: u64,
    sequence: u32,
}

impl JobId {
    pub fn new(date: NaiveDate, user_id: u64, sequence: u32) -> Self {
        Self {
            date,
            user_id,
            sequence,
        }
    }

    /// Parses the canonical string form `YYYY/MM/DD/<user_id>/<seq>` (as
    /// produced by [`JobId::to_string`]), e.g. for CLI `--job <JOB_ID>`
    /// arguments.
    pub fn parse(s: &str) -> Result<Self, MediaforgeError> {
        let parts: Vec<&str> = s.split('/').collect();
        let [y, m, d, user, seq] = parts.as_slice() else {
            return Err(MediaforgeError::ValidationError(format!(
                "job id '{}' must have form YYYY/MM/DD/user_id/seq",
                s
            )));
        };
        let invalid = |field: &str| MediaforgeError::ValidationError(format!("job id '{}': invalid {}", s, field));
        let year: i32 = y.parse().map_err(|_| invalid("year"))?;
        let month: u32 = m.parse().map_err(|_| invalid("month"))?;
        let day: u32 = d.parse().map_err(|_| invalid("day"))?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("date"))?;
        let user_id: u64 = user.parse().map_err(|_| invalid("user_id"))?;
        let sequence: u32 = seq.parse().map_err(|_| invalid("sequence"))?;
        Ok(Self::new(date, user_id, sequence))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Relative directory path for this job under the jobs root.
    pub fn relative_dir(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(format!(
            "{:04}/{:02}/{:02}/{}/{}",
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.user_id,
            self.sequence
        ))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.date.format("%Y/%m/%d"),
            self.user_id,
            self.sequence
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_parse() {
        let id = JobId::new(NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), 42, 7);
        let s = id.to_string();
        assert_eq!(s, "2026/07/27/42/7");
        assert_eq!(JobId::parse(&s).unwrap(), id);
    }

    #[test]
    fn sorts_lexicographically_by_creation_order() {
        let a = JobId::new(NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), 42, 1);
        let b = JobId::new(NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(), 42, 2);
        assert!(a < b);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(JobId::parse("not-a-job-id").is_err());
        assert!(JobId::parse("2026/13/40/42/1").is_err());
    }
}
