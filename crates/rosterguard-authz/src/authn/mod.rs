use crate::errors::AuthError;
use async_trait::async_trait;
use rosterguard_types::prelude::Actor;

#[cfg(feature = "authn-static")]
pub mod static_tokens;

/// Credentials lifted off a request before the identity provider sees them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub bearer: Option<String>,
    pub session_cookie: Option<String>,
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer: Some(token.into()),
            session_cookie: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bearer.is_none() && self.session_cookie.is_none()
    }

    /// Bearer token first, then session cookie.
    pub fn token(&self) -> Option<&str> {
        self.bearer
            .as_deref()
            .or(self.session_cookie.as_deref())
            .filter(|token| !token.is_empty())
    }
}

/// Session/actor adapter. Implementations answer "who is calling".
///
/// Return `errors::unauthenticated` for a missing or invalid session and
/// `errors::provider_unavailable` when the identity provider itself failed.
#[async_trait]
pub trait ActorProvider: Send + Sync {
    async fn current_actor(&self, credentials: &Credentials) -> Result<Actor, AuthError>;
}
