use rosterguard_errors::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0:?}")]
pub struct AuthError(pub ErrorObj);

impl AuthError {
    pub fn into_inner(self) -> ErrorObj {
        self.0
    }

    pub fn kind(&self) -> ErrorKind {
        self.0.kind
    }
}

pub fn unauthenticated(msg: &str) -> AuthError {
    AuthError(
        ErrorBuilder::new(codes::AUTH_UNAUTHENTICATED)
            .dev_msg(msg)
            .build(),
    )
}

pub fn forbidden(msg: &str) -> AuthError {
    AuthError(ErrorBuilder::new(codes::AUTH_FORBIDDEN).dev_msg(msg).build())
}

pub fn not_found(msg: &str) -> AuthError {
    AuthError(
        ErrorBuilder::new(codes::STORAGE_NOT_FOUND)
            .dev_msg(msg)
            .build(),
    )
}

pub fn provider_unavailable(msg: &str) -> AuthError {
    AuthError(
        ErrorBuilder::new(codes::UNKNOWN_INTERNAL)
            .dev_msg(msg)
            .build(),
    )
}
