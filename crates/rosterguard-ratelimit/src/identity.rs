use serde::{Deserialize, Serialize};

/// Shared key for callers whose address cannot be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Identifying attributes of one request, as seen by the limiter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIdentity {
    pub client_addr: Option<String>,
    pub route: String,
}

impl RequestIdentity {
    pub fn new(client_addr: Option<String>, route: impl Into<String>) -> Self {
        Self {
            client_addr,
            route: route.into(),
        }
    }

    /// Best-effort client address, or [`UNKNOWN_CLIENT`].
    pub fn client_or_unknown(&self) -> &str {
        self.client_addr
            .as_deref()
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .unwrap_or(UNKNOWN_CLIENT)
    }
}
