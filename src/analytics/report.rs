use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classify::DimensionTally;

pub const NO_DATA_MESSAGE: &str = "No completed baseline assessments found";

/// Aggregate statistics for one dimension. `below_count`/`above_count` are
/// tallied over every non-anonymized session in the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionStats {
    pub median: f64,
    pub count: usize,
    pub below_count: usize,
    pub above_count: usize,
}

impl DimensionStats {
    pub fn new(median: f64, count: usize, tally: DimensionTally) -> Self {
        Self { median, count, below_count: tally.below, above_count: tally.above }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyReport {
    pub total_assessments: usize,
    pub message: &'static str,
}

/// Report for a sample too small to split: one stats node per dimension over
/// the whole population.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsplitReport {
    pub total_assessments: usize,
    pub is_split: bool,
    pub psychological: DimensionStats,
    pub biological: DimensionStats,
    pub social: DimensionStats,
}

/// One chronological half of a split population.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfReport {
    pub first_date: DateTime<Utc>,
    pub last_date: DateTime<Utc>,
    pub count: usize,
    pub psychological: DimensionStats,
    pub biological: DimensionStats,
    pub social: DimensionStats,
}

/// Report for a large sample, split at `floor(n/2)` into time-ordered halves
/// so the two periods can be compared for a trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitReport {
    pub total_assessments: usize,
    pub is_split: bool,
    pub split_at: usize,
    pub first_half: HalfReport,
    pub second_half: HalfReport,
}

/// Derived analysis result; never persisted. Shape depends on sample size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BaselineReport {
    Empty(EmptyReport),
    Unsplit(UnsplitReport),
    Split(SplitReport),
}

impl BaselineReport {
    pub fn empty() -> Self {
        BaselineReport::Empty(EmptyReport { total_assessments: 0, message: NO_DATA_MESSAGE })
    }

    pub fn total_assessments(&self) -> usize {
        match self {
            BaselineReport::Empty(r) => r.total_assessments,
            BaselineReport::Unsplit(r) => r.total_assessments,
            BaselineReport::Split(r) => r.total_assessments,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, BaselineReport::Split(_))
    }
}
