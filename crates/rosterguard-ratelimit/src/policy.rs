use crate::errors::PolicyError;
use crate::identity::RequestIdentity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const AUTH_POLICY: &str = "auth";
pub const API_POLICY: &str = "api";
pub const SENSITIVE_POLICY: &str = "sensitive";

/// How a request identity is folded into a window-store key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyStrategy {
    /// `<prefix>:<client>`, one budget per client across every route of the family.
    Client { prefix: String },
    /// `<client>:<route>`, so one route cannot drain another's budget.
    ClientAndRoute,
}

impl KeyStrategy {
    pub fn derive(&self, identity: &RequestIdentity) -> String {
        let client = identity.client_or_unknown();
        match self {
            KeyStrategy::Client { prefix } if prefix.is_empty() => client.to_string(),
            KeyStrategy::Client { prefix } => format!("{prefix}:{client}"),
            KeyStrategy::ClientAndRoute => format!("{client}:{}", identity.route),
        }
    }
}

/// Serializable form of a policy as it appears in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySpec {
    pub window_ms: u64,
    pub max_requests: u32,
    pub key: KeyStrategy,
}

/// Window length, ceiling and key derivation for one route family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitPolicy {
    name: String,
    window_ms: u64,
    max_requests: u32,
    key: KeyStrategy,
}

impl RateLimitPolicy {
    pub fn new(
        name: impl Into<String>,
        window_ms: u64,
        max_requests: u32,
        key: KeyStrategy,
    ) -> Result<Self, PolicyError> {
        let name = name.into();
        if window_ms == 0 {
            return Err(PolicyError::ZeroWindow(name));
        }
        if max_requests == 0 {
            return Err(PolicyError::ZeroCeiling(name));
        }
        Ok(Self {
            name,
            window_ms,
            max_requests,
            key,
        })
    }

    pub fn from_spec(name: impl Into<String>, spec: &PolicySpec) -> Result<Self, PolicyError> {
        Self::new(name, spec.window_ms, spec.max_requests, spec.key.clone())
    }

    /// Authentication endpoints: 15 minutes, 5 attempts, keyed `login:<client>`.
    pub fn auth() -> Self {
        Self {
            name: AUTH_POLICY.into(),
            window_ms: 15 * 60 * 1_000,
            max_requests: 5,
            key: KeyStrategy::Client {
                prefix: "login".into(),
            },
        }
    }

    /// General API traffic: 1 minute, 60 requests per route.
    pub fn api() -> Self {
        Self {
            name: API_POLICY.into(),
            window_ms: 60 * 1_000,
            max_requests: 60,
            key: KeyStrategy::ClientAndRoute,
        }
    }

    /// Sensitive mutating endpoints: 1 minute, 20 requests per route.
    pub fn sensitive() -> Self {
        Self {
            name: SENSITIVE_POLICY.into(),
            window_ms: 60 * 1_000,
            max_requests: 20,
            key: KeyStrategy::ClientAndRoute,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn key_strategy(&self) -> &KeyStrategy {
        &self.key
    }

    pub fn key_for(&self, identity: &RequestIdentity) -> String {
        self.key.derive(identity)
    }

    pub fn to_spec(&self) -> PolicySpec {
        PolicySpec {
            window_ms: self.window_ms,
            max_requests: self.max_requests,
            key: self.key.clone(),
        }
    }
}

/// Named policies available to routes, with a fallback for unbound routes.
#[derive(Clone, Debug)]
pub struct PolicySet {
    policies: BTreeMap<String, Arc<RateLimitPolicy>>,
    default: String,
}

impl PolicySet {
    pub fn builtin() -> Self {
        let mut set = Self {
            policies: BTreeMap::new(),
            default: API_POLICY.into(),
        };
        set.insert(RateLimitPolicy::auth());
        set.insert(RateLimitPolicy::api());
        set.insert(RateLimitPolicy::sensitive());
        set
    }

    /// Built-ins overlaid with configured specs; a spec named like a built-in replaces it.
    pub fn from_specs<'a, I>(specs: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = (&'a String, &'a PolicySpec)>,
    {
        let mut set = Self::builtin();
        for (name, spec) in specs {
            set.insert(RateLimitPolicy::from_spec(name.clone(), spec)?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, policy: RateLimitPolicy) {
        self.policies
            .insert(policy.name().to_string(), Arc::new(policy));
    }

    pub fn with_default(mut self, name: impl Into<String>) -> Result<Self, PolicyError> {
        let name = name.into();
        if !self.policies.contains_key(&name) {
            return Err(PolicyError::Unknown(name));
        }
        self.default = name;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<Arc<RateLimitPolicy>> {
        self.policies.get(name).cloned()
    }

    /// Policy bound to a route, or the default when the route names none.
    pub fn resolve(&self, name: Option<&str>) -> Result<Arc<RateLimitPolicy>, PolicyError> {
        let name = name.unwrap_or(&self.default);
        self.get(name)
            .ok_or_else(|| PolicyError::Unknown(name.to_string()))
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RateLimitPolicy>> {
        self.policies.values()
    }
}

impl Default for PolicySet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(addr: Option<&str>, route: &str) -> RequestIdentity {
        RequestIdentity::new(addr.map(str::to_string), route)
    }

    #[test]
    fn auth_policy_keys_by_login_prefix() {
        let policy = RateLimitPolicy::auth();
        assert_eq!(
            policy.key_for(&identity(Some("1.2.3.4"), "/api/auth/login")),
            "login:1.2.3.4"
        );
        assert_eq!(policy.window_ms(), 900_000);
        assert_eq!(policy.max_requests(), 5);
    }

    #[test]
    fn route_scoped_keys_separate_routes() {
        let policy = RateLimitPolicy::api();
        let players = policy.key_for(&identity(Some("10.0.0.1"), "/api/players"));
        let games = policy.key_for(&identity(Some("10.0.0.1"), "/api/games"));
        assert_eq!(players, "10.0.0.1:/api/players");
        assert_ne!(players, games);
    }

    #[test]
    fn missing_address_falls_back_to_unknown() {
        let policy = RateLimitPolicy::auth();
        assert_eq!(policy.key_for(&identity(None, "/login")), "login:unknown");
        assert_eq!(policy.key_for(&identity(Some("  "), "/login")), "login:unknown");
    }

    #[test]
    fn zero_ceiling_is_rejected() {
        let err = RateLimitPolicy::new("bad", 1_000, 0, KeyStrategy::ClientAndRoute).unwrap_err();
        assert_eq!(err, PolicyError::ZeroCeiling("bad".into()));
        assert!(RateLimitPolicy::new("bad", 0, 1, KeyStrategy::ClientAndRoute).is_err());
    }

    #[test]
    fn configured_specs_override_builtins() {
        let mut specs = BTreeMap::new();
        specs.insert(
            "auth".to_string(),
            PolicySpec {
                window_ms: 1_000,
                max_requests: 2,
                key: KeyStrategy::Client {
                    prefix: "login".into(),
                },
            },
        );
        specs.insert(
            "exports".to_string(),
            PolicySpec {
                window_ms: 3_600_000,
                max_requests: 3,
                key: KeyStrategy::ClientAndRoute,
            },
        );
        let set = PolicySet::from_specs(&specs).unwrap();
        assert_eq!(set.get("auth").unwrap().max_requests(), 2);
        assert_eq!(set.get("exports").unwrap().window_ms(), 3_600_000);
        assert_eq!(set.resolve(None).unwrap().name(), "api");
        assert!(set.resolve(Some("missing")).is_err());
    }

    #[test]
    fn key_strategy_deserializes_from_tagged_form() {
        let key: KeyStrategy =
            serde_json::from_value(serde_json::json!({"kind": "client", "prefix": "login"}))
                .unwrap();
        assert_eq!(
            key,
            KeyStrategy::Client {
                prefix: "login".into()
            }
        );
        let key: KeyStrategy =
            serde_json::from_value(serde_json::json!({"kind": "client_and_route"})).unwrap();
        assert_eq!(key, KeyStrategy::ClientAndRoute);
    }
}
