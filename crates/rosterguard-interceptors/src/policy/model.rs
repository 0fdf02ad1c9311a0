use rosterguard_authz::prelude::Action;
use rosterguard_types::prelude::ResourceKind;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoutePolicySpec {
    pub when: MatchCond,
    pub bind: RouteBindingSpec,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MatchCond {
    Http {
        method: String,
        #[serde(alias = "path")]
        path_glob: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteBindingSpec {
    pub resource: ResourceKind,
    pub action: Action,
    /// Path capture naming the targeted resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_param: Option<String>,
    /// Named rate-limit policy; the policy set default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<String>,
}

impl RoutePolicySpec {
    pub fn http(method: &str, path_glob: &str, resource: ResourceKind, action: Action) -> Self {
        Self {
            when: MatchCond::Http {
                method: method.to_string(),
                path_glob: path_glob.to_string(),
            },
            bind: RouteBindingSpec {
                resource,
                action,
                target_param: None,
                rate_limit: None,
            },
        }
    }

    pub fn target(mut self, param: &str) -> Self {
        self.bind.target_param = Some(param.to_string());
        self
    }

    pub fn rate_limit(mut self, policy: &str) -> Self {
        self.bind.rate_limit = Some(policy.to_string());
        self
    }

    pub fn path_glob(&self) -> &str {
        match &self.when {
            MatchCond::Http { path_glob, .. } => path_glob,
        }
    }
}
