use std::collections::HashMap;

use crate::database::models::assessment::AssessmentSession;
use crate::database::models::threshold::{Factor, Threshold};

use super::AnalyticsError;

/// Classification of one raw score against a factor's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Moderate,
    High,
}

/// `score < below` is low, `score > above` is high; both bounds themselves
/// classify as moderate.
pub fn classify(score: i32, threshold: &Threshold) -> Severity {
    if score < threshold.below {
        Severity::Low
    } else if score > threshold.above {
        Severity::High
    } else {
        Severity::Moderate
    }
}

/// Low/high counters for one dimension. Moderate scores are never tallied;
/// only the extremes feed the aggregate overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionTally {
    pub below: usize,
    pub above: usize,
}

impl DimensionTally {
    pub fn merge(self, other: Self) -> Self {
        Self { below: self.below + other.below, above: self.above + other.above }
    }
}

/// Counters across all three dimensions. Merging is a commutative sum, so
/// per-session tallies can be folded in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationTally {
    pub psychological: DimensionTally,
    pub biological: DimensionTally,
    pub social: DimensionTally,
}

impl ClassificationTally {
    pub fn merge(self, other: Self) -> Self {
        Self {
            psychological: self.psychological.merge(other.psychological),
            biological: self.biological.merge(other.biological),
            social: self.social.merge(other.social),
        }
    }

    pub fn get(&self, factor: Factor) -> DimensionTally {
        match factor {
            Factor::Psychological => self.psychological,
            Factor::Biological => self.biological,
            Factor::Social => self.social,
        }
    }

    fn record(mut self, factor: Factor, severity: Severity) -> Self {
        let slot = match factor {
            Factor::Psychological => &mut self.psychological,
            Factor::Biological => &mut self.biological,
            Factor::Social => &mut self.social,
        };
        match severity {
            Severity::Low => slot.below += 1,
            Severity::High => slot.above += 1,
            Severity::Moderate => {}
        }
        self
    }
}

pub type ThresholdMap = HashMap<Factor, Threshold>;

/// Collapse threshold rows into one winner per factor. The storage layer
/// permits duplicate rows per factor; rows arrive oldest first, so the most
/// recently created row wins.
pub fn threshold_map(rows: Vec<Threshold>) -> ThresholdMap {
    rows.into_iter().map(|t| (t.factor, t)).collect()
}

/// Classify one non-anonymized session across all three factors. A factor
/// with no configured threshold is a typed failure, not a skipped score.
pub fn classify_session(
    session: &AssessmentSession,
    thresholds: &ThresholdMap,
) -> Result<ClassificationTally, AnalyticsError> {
    let mut tally = ClassificationTally::default();
    for factor in Factor::ALL {
        let threshold = thresholds
            .get(&factor)
            .ok_or(AnalyticsError::ThresholdMissing(factor))?;
        tally = tally.record(factor, classify(session.score(factor), threshold));
    }
    Ok(tally)
}
