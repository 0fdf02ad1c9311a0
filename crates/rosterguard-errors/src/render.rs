use crate::{
    kind::ErrorKind,
    model::{meta_keys, ErrorObj},
    retry::RetryClass,
    severity::Severity,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body shape returned to HTTP callers. Carries nothing beyond the taxonomy.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicErrorView {
    pub error: String,
    pub code: &'static str,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditErrorView {
    pub code: &'static str,
    pub kind: &'static str,
    pub http_status: u16,
    pub retryable: &'static str,
    pub severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_dev: Option<String>,
    pub meta: Map<String, Value>,
}

impl ErrorObj {
    pub fn to_public(&self) -> PublicErrorView {
        let retry_after = match self.kind {
            ErrorKind::RateLimited => self.meta_u64(meta_keys::RETRY_AFTER_SECS),
            _ => None,
        };
        PublicErrorView {
            error: self.message_user.clone(),
            code: self.code.0,
            retry_after,
            correlation_id: self.correlation_id.clone(),
        }
    }

    pub fn to_audit(&self) -> AuditErrorView {
        AuditErrorView {
            code: self.code.0,
            kind: ErrorKind::as_str(self.kind),
            http_status: self.http_status,
            retryable: RetryClass::as_str(self.retryable),
            severity: Severity::as_str(self.severity),
            message_dev: self.message_dev.clone(),
            meta: self.meta.clone(),
        }
    }
}
