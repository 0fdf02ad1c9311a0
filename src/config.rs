//! Application configuration.
//!
//! Values come from built-in defaults, then an optional YAML file, then
//! `ROSTERGUARD_*` environment overrides. [`AppConfig::validate`] turns the
//! raw values into the policy set and route table the admission chains use.

use rosterguard_errors::prelude::{codes, ErrorBuilder, ErrorObj};
use rosterguard_interceptors::prelude::{RoutePolicy, RoutePolicySpec};
use rosterguard_ratelimit::prelude::{PolicyError, PolicySet, PolicySpec};
use rosterguard_types::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_BIND: &str = "ROSTERGUARD_BIND";
pub const ENV_LOG_LEVEL: &str = "ROSTERGUARD_LOG_LEVEL";
pub const ENV_AUTH_MAX_REQUESTS: &str = "ROSTERGUARD_AUTH_MAX_REQUESTS";
pub const ENV_API_MAX_REQUESTS: &str = "ROSTERGUARD_API_MAX_REQUESTS";
pub const ENV_SENSITIVE_MAX_REQUESTS: &str = "ROSTERGUARD_SENSITIVE_MAX_REQUESTS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("route {route}: {reason}")]
    Route { route: String, reason: String },
    #[error("rate_limit.sweep_probability must be within 0.0..=1.0, got {0}")]
    SweepProbability(f64),
    #[error("demo actor {0}: unknown role")]
    DemoActor(String),
}

impl ConfigError {
    pub fn into_error_obj(self) -> ErrorObj {
        ErrorBuilder::new(codes::CONFIG_INVALID)
            .dev_msg(self.to_string())
            .build()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub rate_limit: RateLimitConfig,
    /// Route table. Empty means the built-in table.
    pub routes: Vec<RoutePolicySpec>,
    pub demo: DemoConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub sweep_probability: f64,
    /// Background sweep period; 0 disables the sweeper task.
    pub sweep_interval_secs: u64,
    /// Policy used by routes that name none.
    pub default_policy: Option<String>,
    /// Overlaid on the built-in `auth`, `api` and `sensitive` policies.
    pub policies: BTreeMap<String, PolicySpec>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            sweep_probability: rosterguard_ratelimit::prelude::SweepTrigger::DEFAULT_PROBABILITY,
            sweep_interval_secs: 60,
            default_policy: None,
            policies: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub actors: Vec<DemoActor>,
    pub resources: Vec<DemoResource>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoActor {
    pub token: String,
    pub id: String,
    pub role: String,
    #[serde(default, rename = "teamId", alias = "team_id")]
    pub team_id: Option<String>,
}

impl DemoActor {
    pub fn to_actor(&self) -> Result<Actor, ConfigError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| ConfigError::DemoActor(self.id.clone()))?;
        Ok(Actor::new(
            self.id.as_str(),
            role,
            self.team_id.as_deref().map(TeamId::from),
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoResource {
    pub kind: ResourceKind,
    pub id: String,
    #[serde(default, rename = "teamId", alias = "team_id")]
    pub team_id: Option<String>,
}

/// A validated configuration ready to build admission chains from.
#[derive(Clone, Debug)]
pub struct Validated {
    pub policies: PolicySet,
    pub routes: RoutePolicy,
    pub actors: Vec<(String, Actor)>,
}

pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Apply `ROSTERGUARD_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides read through `lookup`. Unparseable values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.trim().is_empty()) {
            self.server.bind = bind.trim().to_string();
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            self.log.level = level.trim().to_string();
        }

        let ceilings = [
            (ENV_AUTH_MAX_REQUESTS, rosterguard_ratelimit::policy::AUTH_POLICY),
            (ENV_API_MAX_REQUESTS, rosterguard_ratelimit::policy::API_POLICY),
            (
                ENV_SENSITIVE_MAX_REQUESTS,
                rosterguard_ratelimit::policy::SENSITIVE_POLICY,
            ),
        ];
        for (var, policy) in ceilings {
            let Some(max) = lookup(var).and_then(|v| v.trim().parse::<u32>().ok()) else {
                continue;
            };
            let spec = match self.rate_limit.policies.get(policy) {
                Some(spec) => spec.clone(),
                None => match PolicySet::builtin().get(policy) {
                    Some(existing) => existing.to_spec(),
                    None => continue,
                },
            };
            self.rate_limit.policies.insert(
                policy.to_string(),
                PolicySpec {
                    max_requests: max,
                    ..spec
                },
            );
        }
    }

    pub fn route_specs(&self) -> Vec<RoutePolicySpec> {
        if self.routes.is_empty() {
            crate::policy::default_routes()
        } else {
            self.routes.clone()
        }
    }

    pub fn validate(&self) -> Result<Validated, ConfigError> {
        if !(0.0..=1.0).contains(&self.rate_limit.sweep_probability) {
            return Err(ConfigError::SweepProbability(
                self.rate_limit.sweep_probability,
            ));
        }

        let mut policies = PolicySet::from_specs(&self.rate_limit.policies)?;
        if let Some(name) = &self.rate_limit.default_policy {
            policies = policies.with_default(name.clone())?;
        }

        let specs = self.route_specs();
        for spec in &specs {
            crate::policy::check_route(spec, &policies)?;
        }

        let actors = self
            .demo
            .actors
            .iter()
            .map(|entry| Ok((entry.token.clone(), entry.to_actor()?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Validated {
            policies,
            routes: RoutePolicy::new(specs),
            actors,
        })
    }
}

/// Explicit path, then `./config/rosterguard.yaml`, then the user config
/// dir. A missing file yields defaults (and `path: None`). Environment
/// overrides apply last.
pub fn load(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let candidate = match path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let mut loaded = match candidate {
        Some(path) if path.exists() => LoadedConfig {
            config: AppConfig::from_file(&path)?,
            path: Some(path),
        },
        _ => LoadedConfig {
            config: AppConfig::default(),
            path: None,
        },
    };
    loaded.config.apply_env_overrides();
    Ok(loaded)
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("config/rosterguard.yaml");
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|mut dir| {
        dir.push("rosterguard");
        dir.push("config.yaml");
        dir
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_yaml_is_default() {
        let config = AppConfig::from_yaml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn overrides_replace_only_the_ceiling() {
        let vars: HashMap<&str, &str> = [
            (ENV_AUTH_MAX_REQUESTS, "3"),
            (ENV_API_MAX_REQUESTS, "many"),
            (ENV_BIND, "0.0.0.0:9000"),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();
        config.apply_overrides_from(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        let auth = &config.rate_limit.policies["auth"];
        assert_eq!(auth.max_requests, 3);
        assert_eq!(auth.window_ms, 900_000);
        assert!(!config.rate_limit.policies.contains_key("api"));
    }

    #[test]
    fn zero_ceiling_fails_validation() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(|name| (name == ENV_SENSITIVE_MAX_REQUESTS).then(|| "0".into()));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Policy(PolicyError::ZeroCeiling(_))));
        assert_eq!(err.into_error_obj().http_status, 500);
    }

    #[test]
    fn sweep_probability_is_bounded() {
        let mut config = AppConfig::default();
        config.rate_limit.sweep_probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SweepProbability(_))
        ));
    }
}
