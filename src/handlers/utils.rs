use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::ApiError;

/// Validate a country code parameter: 2-4 ASCII letters, normalized to
/// lowercase.
pub fn validate_country(raw: &str) -> Result<String, ApiError> {
    let country = raw.trim().to_ascii_lowercase();
    if !(2..=4).contains(&country.len()) || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ApiError::bad_request(format!("invalid country code: '{}'", raw)));
    }
    Ok(country)
}

/// Parse an optional RFC 3339 date parameter, reporting the offending field
/// on failure.
pub fn parse_instant(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| {
            let mut field_errors = HashMap::new();
            field_errors
                .insert(field.to_string(), format!("expected RFC 3339 timestamp, got '{}'", raw));
            ApiError::validation_error("Invalid date parameter", Some(field_errors))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes_country_codes() {
        assert_eq!(validate_country("DE").unwrap(), "de");
        assert_eq!(validate_country(" rs ").unwrap(), "rs");
        assert!(validate_country("").is_err());
        assert!(validate_country("d").is_err());
        assert!(validate_country("de-AT").is_err());
        assert!(validate_country("12").is_err());
    }

    #[test]
    fn parses_rfc3339_instants() {
        assert_eq!(parse_instant("startDate", None).unwrap(), None);

        let parsed = parse_instant("startDate", Some("2024-03-01T09:00:00Z")).unwrap();
        assert_eq!(parsed.unwrap().to_rfc3339(), "2024-03-01T09:00:00+00:00");

        let err = parse_instant("endDate", Some("yesterday")).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
