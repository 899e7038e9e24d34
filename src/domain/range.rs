//! Cell timestamp ranges

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open timestamp range `[start_inclusive, end_exclusive)`
///
/// Matches the native HBase scan convention: a cell with timestamp `t` is
/// visible when `start_inclusive <= t < end_exclusive`. An inverted range is
/// legal and simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_inclusive: i64,
    pub end_exclusive: i64,
}

impl TimeRange {
    pub fn new(start_inclusive: i64, end_exclusive: i64) -> Self {
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// True when no timestamp can fall inside the range
    pub fn is_empty(&self) -> bool {
        self.end_exclusive <= self.start_inclusive
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start_inclusive <= timestamp && timestamp < self.end_exclusive
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}
