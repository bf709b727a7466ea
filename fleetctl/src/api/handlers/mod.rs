//! HTTP request handlers for all API endpoints.
//!
//! Handlers are stateless: each call receives the shared
//! [`crate::AppState`] and this request's parsed inputs, and follows
//! the same flow - parse, validate, execute against a repository,
//! fetch related records where the representation needs them, return.
//! Validation failures are raised as [`Error`] values; no handler
//! writes a status code directly.
//!
//! - [`resource_types`]: CRUD for equipment categories
//! - [`resources`]: CRUD for individual equipment, including the
//!   `?type=` listing filter and the derived overspeed metric

pub mod resource_types;
pub mod resources;

use axum::extract::Json;
use axum::extract::rejection::JsonRejection;

use crate::errors::{Error, Result};

/// Parse a path id segment. The route layer matches any string here;
/// a non-numeric segment is reported as an unknown object, matching
/// the service's long-observed behavior.
pub(crate) fn parse_path_id(segment: &str) -> Result<i32> {
    segment.parse::<i32>().map_err(|_| Error::NotFound {
        message: format!("{segment} not found"),
    })
}

/// Parse a comma-separated id list query value. `None` when the value
/// is empty or any element is not a valid id.
pub(crate) fn parse_id_list(raw: &str) -> Option<Vec<i32>> {
    if raw.is_empty() {
        return None;
    }
    raw.split(',').map(|part| part.trim().parse::<i32>().ok()).collect()
}

/// Unwrap an extracted JSON body, converting axum's rejection into the
/// service taxonomy so the client sees a 400 with a `detail` body.
pub(crate) fn require_json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(Error::BadRequest {
            message: "request body contains no data".to_string(),
        }),
        Err(rejection) => Err(Error::BadRequest {
            message: rejection.body_text(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_id_parses_numeric_segments() {
        assert_eq!(parse_path_id("17").unwrap(), 17);
    }

    #[test]
    fn non_numeric_path_id_is_not_found() {
        let err = parse_path_id("abc").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "abc not found");
    }

    #[test]
    fn id_list_accepts_single_and_multiple_ids() {
        assert_eq!(parse_id_list("7"), Some(vec![7]));
        assert_eq!(parse_id_list("1,2,3"), Some(vec![1, 2, 3]));
        assert_eq!(parse_id_list("1, 2"), Some(vec![1, 2]));
    }

    #[test]
    fn id_list_rejects_malformed_input() {
        assert_eq!(parse_id_list(""), None);
        assert_eq!(parse_id_list("1,,2"), None);
        assert_eq!(parse_id_list("1,a"), None);
        assert_eq!(parse_id_list("abc"), None);
    }
}
