use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The three axes of the baseline assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Psychological,
    Biological,
    Social,
}

impl Factor {
    pub const ALL: [Factor; 3] = [Factor::Psychological, Factor::Biological, Factor::Social];

    pub fn as_str(self) -> &'static str {
        match self {
            Factor::Psychological => "psychological",
            Factor::Biological => "biological",
            Factor::Social => "social",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown factor: {0}")]
pub struct ParseFactorError(pub String);

impl FromStr for Factor {
    type Err = ParseFactorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "psychological" => Ok(Factor::Psychological),
            "biological" => Ok(Factor::Biological),
            "social" => Ok(Factor::Social),
            other => Err(ParseFactorError(other.to_string())),
        }
    }
}

/// Per-factor score cutoffs: scores strictly under `below` classify as low,
/// strictly over `above` as high, everything else as moderate.
/// Invariant: `below < above`, enforced at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    pub factor: Factor,
    pub below: i32,
    pub above: i32,
}

impl Threshold {
    pub fn validate(&self) -> Result<(), String> {
        if self.below >= self.above {
            return Err(format!(
                "below ({}) must be strictly less than above ({})",
                self.below, self.above
            ));
        }
        Ok(())
    }
}

/// A stored threshold row as exposed by the management endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRecord {
    pub id: Uuid,
    pub country: String,
    pub factor: Factor,
    pub below: i32,
    pub above: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_round_trips_through_strings() {
        for factor in Factor::ALL {
            assert_eq!(factor.as_str().parse::<Factor>().unwrap(), factor);
        }
        assert!("cognitive".parse::<Factor>().is_err());
    }

    #[test]
    fn validate_requires_below_under_above() {
        let ok = Threshold { factor: Factor::Social, below: 10, above: 20 };
        assert!(ok.validate().is_ok());

        let inverted = Threshold { factor: Factor::Social, below: 20, above: 10 };
        assert!(inverted.validate().is_err());

        let degenerate = Threshold { factor: Factor::Social, below: 10, above: 10 };
        assert!(degenerate.validate().is_err());
    }
}
