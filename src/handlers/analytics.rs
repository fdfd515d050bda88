use axum::extract::Query;
use serde::Deserialize;

use crate::analytics::report::BaselineReport;
use crate::analytics::BaselineAnalyzer;
use crate::database::{DatabaseManager, DateRange, PgBaselineStore};
use crate::middleware::response::{ApiResponse, ApiResult};

use super::utils::{parse_instant, validate_country};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineQuery {
    pub country: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/analytics/baseline-assessments - aggregate completed baseline
/// assessments for a country over an optional inclusive date range
pub async fn baseline_get(Query(query): Query<BaselineQuery>) -> ApiResult<BaselineReport> {
    let country = validate_country(&query.country)?;
    let range = DateRange {
        start: parse_instant("startDate", query.start_date.as_deref())?,
        end: parse_instant("endDate", query.end_date.as_deref())?,
    };

    let pool = DatabaseManager::pool().await?;
    let analyzer = BaselineAnalyzer::new(PgBaselineStore::new(pool));
    let report = analyzer.analyze(&country, range).await?;

    Ok(ApiResponse::success(report))
}
