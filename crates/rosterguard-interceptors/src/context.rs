use async_trait::async_trait;
use http::Extensions;
use rosterguard_authz::prelude::{Action, Credentials};
use rosterguard_ratelimit::prelude::RateLimitInfo;
use rosterguard_types::prelude::*;

/// Per-request state threaded through the stages.
#[derive(Clone, Debug, Default)]
pub struct InterceptContext {
    pub request_id: String,
    pub client_addr: Option<String>,
    pub credentials: Credentials,
    pub actor: Option<Actor>,
    pub route: Option<RouteBinding>,
    pub resource: Option<ResourceRef>,
    pub rate_limit: Option<RateLimitInfo>,
    pub extensions: Extensions,
}

/// What a declared route means for admission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteBinding {
    /// The declared pattern, used as the route-family key by the limiter.
    pub pattern: String,
    pub resource: ResourceKind,
    pub action: Action,
    /// Existing resource the action targets, if any.
    pub target: Option<ResourceId>,
    pub rate_limit: Option<String>,
}

#[async_trait]
pub trait ProtoRequest: Send {
    fn method(&self) -> &str;
    fn path(&self) -> &str;
    fn header(&self, name: &str) -> Option<String>;
    /// Transport-level peer address, when the server knows it.
    fn peer_addr(&self) -> Option<String> {
        None
    }
    async fn read_json(&mut self) -> Result<serde_json::Value, crate::errors::InterceptError>;
}

#[async_trait]
pub trait ProtoResponse: Send {
    fn set_status(&mut self, code: u16);
    fn insert_header(&mut self, name: &str, value: &str);
    async fn write_json(
        &mut self,
        body: &serde_json::Value,
    ) -> Result<(), crate::errors::InterceptError>;
}
