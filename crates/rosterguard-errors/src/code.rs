use crate::{kind::ErrorKind, retry::RetryClass, severity::Severity};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub &'static str);

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match REGISTRY.get_key_value(s.as_str()) {
            Some((key, _)) => Ok(ErrorCode(*key)),
            None => Err(serde::de::Error::custom(format!("unregistered error code: {s}"))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CodeSpec {
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub http_status: u16,
    pub retryable: RetryClass,
    pub severity: Severity,
    pub default_user_msg: &'static str,
}

pub mod codes {
    use super::ErrorCode;

    pub const AUTH_UNAUTHENTICATED: ErrorCode = ErrorCode("AUTH.UNAUTHENTICATED");
    pub const AUTH_FORBIDDEN: ErrorCode = ErrorCode("AUTH.FORBIDDEN");
    pub const QUOTA_RATELIMIT: ErrorCode = ErrorCode("QUOTA.RATE_LIMITED");
    pub const STORAGE_NOT_FOUND: ErrorCode = ErrorCode("STORAGE.NOT_FOUND");
    pub const SCHEMA_VALIDATION: ErrorCode = ErrorCode("SCHEMA.VALIDATION_FAILED");
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("CONFIG.INVALID");
    pub const UNKNOWN_INTERNAL: ErrorCode = ErrorCode("UNKNOWN.INTERNAL");
}

pub static REGISTRY: Lazy<HashMap<&'static str, CodeSpec>> = Lazy::new(|| {
    use codes::*;

    let mut map = HashMap::new();
    let mut add = |spec: CodeSpec| {
        let key = spec.code.0;
        if map.insert(key, spec).is_some() {
            panic!("duplicate error code: {}", key);
        }
    };

    add(CodeSpec {
        code: AUTH_UNAUTHENTICATED,
        kind: ErrorKind::Unauthenticated,
        http_status: 401,
        retryable: RetryClass::None,
        severity: Severity::Warn,
        default_user_msg: "Unauthorized",
    });

    add(CodeSpec {
        code: AUTH_FORBIDDEN,
        kind: ErrorKind::Forbidden,
        http_status: 403,
        retryable: RetryClass::None,
        severity: Severity::Warn,
        default_user_msg: "Forbidden",
    });

    add(CodeSpec {
        code: QUOTA_RATELIMIT,
        kind: ErrorKind::RateLimited,
        http_status: 429,
        retryable: RetryClass::AfterDelay,
        severity: Severity::Warn,
        default_user_msg: "Too many requests",
    });

    add(CodeSpec {
        code: STORAGE_NOT_FOUND,
        kind: ErrorKind::NotFound,
        http_status: 404,
        retryable: RetryClass::None,
        severity: Severity::Info,
        default_user_msg: "Not found",
    });

    add(CodeSpec {
        code: SCHEMA_VALIDATION,
        kind: ErrorKind::Schema,
        http_status: 422,
        retryable: RetryClass::None,
        severity: Severity::Warn,
        default_user_msg: "Invalid request",
    });

    add(CodeSpec {
        code: CONFIG_INVALID,
        kind: ErrorKind::Config,
        http_status: 500,
        retryable: RetryClass::None,
        severity: Severity::Error,
        default_user_msg: "Internal server error",
    });

    add(CodeSpec {
        code: UNKNOWN_INTERNAL,
        kind: ErrorKind::Internal,
        http_status: 500,
        retryable: RetryClass::Transient,
        severity: Severity::Critical,
        default_user_msg: "Internal server error",
    });

    map
});

pub fn spec_of(code: ErrorCode) -> &'static CodeSpec {
    REGISTRY.get(code.0).expect("unregistered ErrorCode")
}
