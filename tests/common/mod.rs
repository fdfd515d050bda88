use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use counsel_admin_api::database::manager::DatabaseError;
use counsel_admin_api::database::models::assessment::{AssessmentAnswer, AssessmentSession};
use counsel_admin_api::database::models::threshold::{Factor, Threshold};
use counsel_admin_api::database::store::{BaselineStore, DateRange};

/// In-memory store honoring the repository contract: completed sessions,
/// inclusive created_at bounds, ascending creation order. Counts repository
/// calls so tests can assert that validation happens before any I/O.
pub struct InMemoryStore {
    pub sessions: Vec<AssessmentSession>,
    pub thresholds: Vec<Threshold>,
    pub calls: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new(sessions: Vec<AssessmentSession>, thresholds: Vec<Threshold>) -> Self {
        Self { sessions, thresholds, calls: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl BaselineStore for InMemoryStore {
    async fn completed_assessments(
        &self,
        _country: &str,
        range: &DateRange,
    ) -> Result<Vec<AssessmentSession>, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut sessions: Vec<AssessmentSession> = self
            .sessions
            .iter()
            .filter(|s| range.start.map_or(true, |start| s.created_at >= start))
            .filter(|s| range.end.map_or(true, |end| s.created_at <= end))
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }

    async fn thresholds_by_factor(&self, _country: &str) -> Result<Vec<Threshold>, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.thresholds.clone())
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// A completed session created `seq` minutes after the base time, answering
/// a uniform question set: 4 psychological, 3 biological, 3 social questions.
pub fn session(
    seq: i64,
    client: Option<Uuid>,
    psychological: i32,
    biological: i32,
    social: i32,
) -> AssessmentSession {
    let created_at = base_time() + Duration::minutes(seq);

    let mut answers = Vec::new();
    for (dimension, questions) in
        [(Factor::Psychological, 4), (Factor::Biological, 3), (Factor::Social, 3)]
    {
        for _ in 0..questions {
            answers.push(AssessmentAnswer {
                question_id: Uuid::new_v4(),
                answer_value: 2,
                dimension,
            });
        }
    }

    AssessmentSession {
        id: Uuid::new_v4(),
        client_detail_id: client,
        completed_at: Some(created_at + Duration::minutes(20)),
        psychological_score: psychological,
        biological_score: biological,
        social_score: social,
        created_at,
        answers,
    }
}

pub fn default_thresholds() -> Vec<Threshold> {
    vec![
        Threshold { factor: Factor::Psychological, below: 15, above: 25 },
        Threshold { factor: Factor::Biological, below: 10, above: 20 },
        Threshold { factor: Factor::Social, below: 10, above: 20 },
    ]
}
