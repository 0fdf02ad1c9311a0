pub use crate::{
    code::{codes, spec_of, CodeSpec, ErrorCode, REGISTRY},
    kind::ErrorKind,
    labels::labels,
    model::{meta_keys, ErrorBuilder, ErrorObj},
    render::{AuditErrorView, PublicErrorView},
    retry::RetryClass,
    severity::Severity,
};
