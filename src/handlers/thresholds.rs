use std::collections::HashMap;

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use crate::database::models::threshold::{Factor, Threshold, ThresholdRecord};
use crate::database::{DatabaseManager, PgBaselineStore};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

use super::utils::validate_country;

#[derive(Debug, Deserialize)]
pub struct ThresholdQuery {
    pub country: String,
}

/// GET /api/thresholds - list configured thresholds for a country
pub async fn thresholds_get(Query(query): Query<ThresholdQuery>) -> ApiResult<Vec<ThresholdRecord>> {
    let country = validate_country(&query.country)?;

    let pool = DatabaseManager::pool().await?;
    let records = PgBaselineStore::new(pool).list_thresholds(&country).await?;

    Ok(ApiResponse::success(records))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThresholdRequest {
    pub country: String,
    pub factor: Factor,
    pub below: i32,
    pub above: i32,
}

/// POST /api/thresholds - create a threshold row
///
/// Duplicate rows per factor are accepted; lookups resolve the newest row per
/// factor.
pub async fn thresholds_post(Json(body): Json<CreateThresholdRequest>) -> ApiResult<ThresholdRecord> {
    let country = validate_country(&body.country)?;

    let threshold = Threshold { factor: body.factor, below: body.below, above: body.above };
    if let Err(reason) = threshold.validate() {
        let mut field_errors = HashMap::new();
        field_errors.insert("below".to_string(), reason);
        return Err(ApiError::validation_error("Invalid threshold bounds", Some(field_errors)));
    }

    let pool = DatabaseManager::pool().await?;
    let record = PgBaselineStore::new(pool).insert_threshold(&country, &threshold).await?;

    Ok(ApiResponse::created(record))
}
