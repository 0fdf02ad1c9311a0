use crate::limiter::Rejection;
use rosterguard_errors::prelude::*;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("policy '{0}': max_requests must be greater than zero")]
    ZeroCeiling(String),
    #[error("policy '{0}': window_ms must be greater than zero")]
    ZeroWindow(String),
    #[error("unknown rate-limit policy '{0}'")]
    Unknown(String),
}

impl PolicyError {
    pub fn into_error_obj(self) -> ErrorObj {
        ErrorBuilder::new(codes::CONFIG_INVALID)
            .dev_msg(self.to_string())
            .build()
    }
}

/// Build the public rate-limit failure carrying the throttling metadata.
pub fn rate_limited(rejection: &Rejection, policy: &str) -> ErrorObj {
    ErrorBuilder::new(codes::QUOTA_RATELIMIT)
        .dev_msg(format!("policy '{policy}' exhausted"))
        .meta_kv(meta_keys::RETRY_AFTER_SECS, json!(rejection.retry_after_secs))
        .meta_kv(meta_keys::LIMIT, json!(rejection.limit))
        .meta_kv(meta_keys::REMAINING, json!(rejection.remaining))
        .meta_kv(meta_keys::RESET_AT_MS, json!(rejection.reset_at_ms))
        .meta_kv("policy", json!(policy))
        .build()
}
