use crate::context::ProtoResponse;
use rosterguard_errors::prelude::*;
use rosterguard_ratelimit::prelude::Rejection;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0:?}")]
pub struct InterceptError(pub ErrorObj);

impl InterceptError {
    pub fn into_inner(self) -> ErrorObj {
        self.0
    }

    pub fn kind(&self) -> ErrorKind {
        self.0.kind
    }

    pub fn unauthenticated(msg: &str) -> Self {
        InterceptError(
            ErrorBuilder::new(codes::AUTH_UNAUTHENTICATED)
                .dev_msg(msg)
                .build(),
        )
    }

    pub fn forbidden(msg: &str) -> Self {
        InterceptError(ErrorBuilder::new(codes::AUTH_FORBIDDEN).dev_msg(msg).build())
    }

    pub fn not_found(msg: &str) -> Self {
        InterceptError(
            ErrorBuilder::new(codes::STORAGE_NOT_FOUND)
                .dev_msg(msg)
                .build(),
        )
    }

    pub fn rate_limited(rejection: &Rejection, policy: &str) -> Self {
        InterceptError(rosterguard_ratelimit::errors::rate_limited(rejection, policy))
    }

    pub fn internal(msg: &str) -> Self {
        InterceptError(
            ErrorBuilder::new(codes::UNKNOWN_INTERNAL)
                .dev_msg(msg)
                .build(),
        )
    }

    pub fn schema(msg: &str) -> Self {
        InterceptError(
            ErrorBuilder::new(codes::SCHEMA_VALIDATION)
                .dev_msg(msg)
                .build(),
        )
    }

    pub fn from_error(err: ErrorObj) -> Self {
        InterceptError(err)
    }

    pub fn with_correlation(mut self, request_id: &str) -> Self {
        if self.0.correlation_id.is_none() && !request_id.is_empty() {
            self.0.correlation_id = Some(request_id.to_string());
        }
        self
    }
}

pub fn to_http_response(err: &InterceptError) -> (u16, serde_json::Value) {
    let obj = &err.0;
    let body = serde_json::to_value(obj.to_public())
        .unwrap_or_else(|_| serde_json::json!({ "error": obj.message_user }));
    (obj.http_status, body)
}

/// `Retry-After` and `X-RateLimit-*` headers for a rate-limit failure; empty otherwise.
pub fn rejection_headers(err: &InterceptError) -> Vec<(&'static str, String)> {
    let obj = &err.0;
    if obj.kind != ErrorKind::RateLimited {
        return Vec::new();
    }
    let mut headers = Vec::with_capacity(4);
    if let Some(retry) = obj.meta_u64(meta_keys::RETRY_AFTER_SECS) {
        headers.push(("Retry-After", retry.to_string()));
    }
    if let Some(limit) = obj.meta_u64(meta_keys::LIMIT) {
        headers.push(("X-RateLimit-Limit", limit.to_string()));
    }
    headers.push(("X-RateLimit-Remaining", "0".to_string()));
    if let Some(reset) = obj.meta_i64(meta_keys::RESET_AT_MS) {
        headers.push(("X-RateLimit-Reset", reset.to_string()));
    }
    headers
}

pub async fn write_rejection(
    rsp: &mut dyn ProtoResponse,
    err: &InterceptError,
) -> Result<(), InterceptError> {
    let (status, body) = to_http_response(err);
    rsp.set_status(status);
    for (name, value) in rejection_headers(err) {
        rsp.insert_header(name, &value);
    }
    if let Some(request_id) = err.0.correlation_id.as_deref() {
        rsp.insert_header("X-Request-Id", request_id);
    }
    rsp.write_json(&body).await
}
