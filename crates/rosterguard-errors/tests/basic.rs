use serde_json::json;
use rosterguard_errors::prelude::*;

#[test]
fn build_and_render_public() {
    let err = ErrorBuilder::new(codes::AUTH_UNAUTHENTICATED)
        .dev_msg("missing bearer token")
        .correlation("req-123")
        .build();

    let public_view = err.to_public();
    assert_eq!(public_view.error, "Unauthorized");
    assert_eq!(public_view.code, "AUTH.UNAUTHENTICATED");
    assert_eq!(public_view.correlation_id.as_deref(), Some("req-123"));

    let body = serde_json::to_value(&public_view).unwrap();
    assert!(body.get("retryAfter").is_none());
    assert!(!body.to_string().contains("missing bearer token"));

    let labels = labels(&err);
    assert_eq!(labels.get("kind").unwrap(), "Unauthenticated");
}

#[test]
fn rate_limited_public_view_carries_retry_after() {
    let err = ErrorBuilder::new(codes::QUOTA_RATELIMIT)
        .meta_kv(meta_keys::RETRY_AFTER_SECS, json!(42))
        .meta_kv("policy", json!("auth"))
        .build();

    assert_eq!(err.http_status, 429);
    assert_eq!(err.retryable, RetryClass::AfterDelay);
    let body = serde_json::to_value(err.to_public()).unwrap();
    assert_eq!(body["error"], "Too many requests");
    assert_eq!(body["retryAfter"], 42);
    assert_eq!(labels(&err).get("policy").unwrap(), "auth");
}

#[test]
fn forbidden_body_is_fixed() {
    let err = ErrorBuilder::new(codes::AUTH_FORBIDDEN)
        .dev_msg("coach team mismatch")
        .build();
    let body = serde_json::to_value(err.to_public()).unwrap();
    assert_eq!(body["error"], "Forbidden");
    assert_eq!(err.to_audit().message_dev.as_deref(), Some("coach team mismatch"));
}

#[test]
fn error_codes_deserialize_only_when_registered() {
    let code: ErrorCode = serde_json::from_value(json!("STORAGE.NOT_FOUND")).unwrap();
    assert_eq!(code, codes::STORAGE_NOT_FOUND);
    assert!(serde_json::from_value::<ErrorCode>(json!("NOPE.NOPE")).is_err());
}

#[test]
fn refusals_are_not_faults() {
    let forbidden = ErrorBuilder::new(codes::AUTH_FORBIDDEN).build();
    let throttled = ErrorBuilder::new(codes::QUOTA_RATELIMIT).build();
    let internal = ErrorBuilder::new(codes::UNKNOWN_INTERNAL).build();

    assert!(!forbidden.severity.is_fault());
    assert!(!throttled.severity.is_fault());
    assert!(internal.severity.is_fault());
    assert!(Severity::Critical > Severity::Warn);
    assert_eq!(labels(&internal).get("severity").unwrap(), &internal.severity.to_string());
    assert_eq!(serde_json::to_value(Severity::Warn).unwrap(), json!("warn"));
}

#[cfg(feature = "http")]
#[test]
fn status_of_keeps_error_statuses() {
    use rosterguard_errors::mapping_http::status_of;

    let err = ErrorBuilder::new(codes::QUOTA_RATELIMIT).build();
    assert_eq!(status_of(&err).as_u16(), 429);
}

#[cfg(feature = "http")]
#[test]
fn status_of_never_reports_success() {
    use rosterguard_errors::mapping_http::status_of;

    let mut err = ErrorBuilder::new(codes::AUTH_FORBIDDEN).build();
    err.http_status = 200;
    assert_eq!(status_of(&err).as_u16(), 500);
    err.http_status = 7;
    assert_eq!(status_of(&err).as_u16(), 500);
}
