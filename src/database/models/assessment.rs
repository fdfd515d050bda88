use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::threshold::Factor;

/// One answered question inside a completed session, tagged with the
/// dimension the question belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentAnswer {
    pub question_id: Uuid,
    pub answer_value: i32,
    pub dimension: Factor,
}

/// A completed baseline assessment session with its answers joined in.
/// Immutable once read; `client_detail_id = None` marks an anonymized
/// session with no linked client identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSession {
    pub id: Uuid,
    pub client_detail_id: Option<Uuid>,
    pub completed_at: Option<DateTime<Utc>>,
    pub psychological_score: i32,
    pub biological_score: i32,
    pub social_score: i32,
    pub created_at: DateTime<Utc>,
    pub answers: Vec<AssessmentAnswer>,
}

impl AssessmentSession {
    /// Anonymized sessions count toward aggregate medians but are excluded
    /// from per-client classification.
    pub fn is_anonymized(&self) -> bool {
        self.client_detail_id.is_none()
    }

    /// Raw score for one dimension.
    pub fn score(&self, factor: Factor) -> i32 {
        match factor {
            Factor::Psychological => self.psychological_score,
            Factor::Biological => self.biological_score,
            Factor::Social => self.social_score,
        }
    }

    /// Question ids answered for one dimension.
    pub fn question_ids(&self, factor: Factor) -> Vec<Uuid> {
        self.answers
            .iter()
            .filter(|a| a.dimension == factor)
            .map(|a| a.question_id)
            .collect()
    }
}
