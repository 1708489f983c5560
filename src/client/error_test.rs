use reqwest::StatusCode;
use serde_json::json;

use crate::client::ApiError;

#[test]
fn test_error_field_wins_over_message() {
    let body = json!({"error": "invalid key", "message": "ignored"}).to_string();

    let err = ApiError::from_response(StatusCode::UNAUTHORIZED, &body);

    assert_eq!(err.error, "invalid key");
    assert_eq!(err.status, Some(401));
}

#[test]
fn test_message_field_used_without_error() {
    let body = json!({"message": "task not found", "code": "TASK_NOT_FOUND"}).to_string();

    let err = ApiError::from_response(StatusCode::NOT_FOUND, &body);

    assert_eq!(err.error, "task not found");
    assert_eq!(err.code.as_deref(), Some("TASK_NOT_FOUND"));
}

#[test]
fn test_status_message_for_non_json_body() {
    let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");

    assert_eq!(err.error, "Request failed with status code 502");
    assert!(err.code.is_none());
    assert!(err.details.is_none());
}

#[test]
fn test_empty_error_string_falls_through() {
    let body = json!({"error": "", "message": "validation failed"}).to_string();

    let err = ApiError::from_response(StatusCode::UNPROCESSABLE_ENTITY, &body);

    assert_eq!(err.error, "validation failed");
}

#[test]
fn test_details_are_kept() {
    let body = json!({
        "error": "validation failed",
        "details": {"field": "completion_percentage", "reason": "out of range"}
    })
    .to_string();

    let err = ApiError::from_response(StatusCode::BAD_REQUEST, &body);

    assert_eq!(err.details.unwrap()["field"], "completion_percentage");
}

#[test]
fn test_display_is_the_message() {
    let err = ApiError::new("boom").with_code("E_BOOM");

    assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_serialized_shape_skips_empty_fields() {
    let err = ApiError::new("boom");
    let value = serde_json::to_value(&err).unwrap();

    assert_eq!(value["error"], "boom");
    assert!(value.get("code").is_none());
    assert!(value.get("details").is_none());
    assert!(value.get("timestamp").is_some());
}
