use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::assessment::{AssessmentAnswer, AssessmentSession};
use crate::database::models::threshold::{Factor, Threshold, ThresholdRecord};

/// Optional inclusive bounds on `created_at`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Data-access contract consumed by the baseline analyzer.
#[async_trait]
pub trait BaselineStore: Send + Sync {
    /// Completed sessions for a country with their answers joined in,
    /// inclusive `created_at` bounds, ordered by creation time ascending.
    async fn completed_assessments(
        &self,
        country: &str,
        range: &DateRange,
    ) -> Result<Vec<AssessmentSession>, DatabaseError>;

    /// Threshold rows for a country, oldest first. May contain more than one
    /// row per factor.
    async fn thresholds_by_factor(&self, country: &str) -> Result<Vec<Threshold>, DatabaseError>;
}

/// Postgres-backed store over the assessment tables.
pub struct PgBaselineStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    client_detail_id: Option<Uuid>,
    completed_at: Option<DateTime<Utc>>,
    psychological_score: i32,
    biological_score: i32,
    social_score: i32,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    assessment_id: Uuid,
    question_id: Uuid,
    answer_value: i32,
    dimension: String,
}

#[derive(sqlx::FromRow)]
struct ThresholdRow {
    id: Uuid,
    country: String,
    factor: String,
    below: i32,
    above: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<ThresholdRow> for ThresholdRecord {
    type Error = DatabaseError;

    fn try_from(row: ThresholdRow) -> Result<Self, Self::Error> {
        let factor = parse_factor(&row.factor)?;
        Ok(ThresholdRecord {
            id: row.id,
            country: row.country,
            factor,
            below: row.below,
            above: row.above,
            created_at: row.created_at,
        })
    }
}

fn parse_factor(raw: &str) -> Result<Factor, DatabaseError> {
    raw.parse().map_err(|_| {
        DatabaseError::QueryError(format!("unknown factor '{}' in assessment_thresholds", raw))
    })
}

impl PgBaselineStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All threshold rows for a country, for the management endpoint.
    pub async fn list_thresholds(
        &self,
        country: &str,
    ) -> Result<Vec<ThresholdRecord>, DatabaseError> {
        let rows = self.threshold_rows(country).await?;
        rows.into_iter().map(ThresholdRecord::try_from).collect()
    }

    /// Insert a threshold row. Uniqueness per factor is not enforced;
    /// readers resolve the newest row per factor at lookup time.
    pub async fn insert_threshold(
        &self,
        country: &str,
        threshold: &Threshold,
    ) -> Result<ThresholdRecord, DatabaseError> {
        let row = sqlx::query_as::<_, ThresholdRow>(
            "INSERT INTO assessment_thresholds (country, factor, below, above)
             VALUES ($1, $2, $3, $4)
             RETURNING id, country, factor, below, above, created_at",
        )
        .bind(country)
        .bind(threshold.factor.as_str())
        .bind(threshold.below)
        .bind(threshold.above)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn threshold_rows(&self, country: &str) -> Result<Vec<ThresholdRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ThresholdRow>(
            "SELECT id, country, factor, below, above, created_at
             FROM assessment_thresholds
             WHERE country = $1
             ORDER BY created_at ASC",
        )
        .bind(country)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl BaselineStore for PgBaselineStore {
    async fn completed_assessments(
        &self,
        country: &str,
        range: &DateRange,
    ) -> Result<Vec<AssessmentSession>, DatabaseError> {
        let mut sql = String::from(
            "SELECT id, client_detail_id, completed_at,
                    psychological_score, biological_score, social_score, created_at
             FROM baseline_assessments
             WHERE country = $1 AND status = 'completed'",
        );
        let mut next_param = 2;
        if range.start.is_some() {
            sql.push_str(&format!(" AND created_at >= ${next_param}"));
            next_param += 1;
        }
        if range.end.is_some() {
            sql.push_str(&format!(" AND created_at <= ${next_param}"));
        }
        sql.push_str(" ORDER BY created_at ASC");

        let mut query = sqlx::query_as::<_, SessionRow>(&sql).bind(country);
        if let Some(start) = range.start {
            query = query.bind(start);
        }
        if let Some(end) = range.end {
            query = query.bind(end);
        }
        let rows = query.fetch_all(&self.pool).await?;
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let answer_rows = sqlx::query_as::<_, AnswerRow>(
            "SELECT a.assessment_id, a.question_id, a.answer_value, q.dimension
             FROM baseline_assessment_answers a
             JOIN baseline_questions q ON q.id = a.question_id
             WHERE a.assessment_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<AssessmentAnswer>> = HashMap::new();
        for row in answer_rows {
            let dimension = row.dimension.parse().map_err(|_| {
                DatabaseError::QueryError(format!(
                    "unknown dimension '{}' on question {}",
                    row.dimension, row.question_id
                ))
            })?;
            grouped.entry(row.assessment_id).or_default().push(AssessmentAnswer {
                question_id: row.question_id,
                answer_value: row.answer_value,
                dimension,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| AssessmentSession {
                id: row.id,
                client_detail_id: row.client_detail_id,
                completed_at: row.completed_at,
                psychological_score: row.psychological_score,
                biological_score: row.biological_score,
                social_score: row.social_score,
                created_at: row.created_at,
                answers: grouped.remove(&row.id).unwrap_or_default(),
            })
            .collect())
    }

    async fn thresholds_by_factor(&self, country: &str) -> Result<Vec<Threshold>, DatabaseError> {
        let rows = self.threshold_rows(country).await?;
        rows.into_iter()
            .map(|row| {
                let factor = parse_factor(&row.factor)?;
                Ok(Threshold { factor, below: row.below, above: row.above })
            })
            .collect()
    }
}
