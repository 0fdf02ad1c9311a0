use super::model::{MatchCond, RoutePolicySpec};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct RoutePolicy {
    rules: Vec<RoutePolicySpec>,
}

/// A matched rule together with its `{name}` path captures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub spec: &'a RoutePolicySpec,
    pub params: BTreeMap<String, String>,
}

impl RoutePolicy {
    pub fn new(rules: Vec<RoutePolicySpec>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RoutePolicySpec] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First declared rule matching `method` and `path`.
    pub fn match_http(&self, method: &str, path: &str) -> Option<RouteMatch<'_>> {
        self.rules.iter().find_map(|rule| match &rule.when {
            MatchCond::Http {
                method: expected,
                path_glob,
            } if expected.eq_ignore_ascii_case(method) => {
                path_matches(path_glob, path).map(|params| RouteMatch { spec: rule, params })
            }
            _ => None,
        })
    }
}

fn path_matches(glob: &str, path: &str) -> Option<BTreeMap<String, String>> {
    if let Some(prefix) = glob.strip_suffix('*') {
        return path.starts_with(prefix).then(BTreeMap::new);
    }

    let pattern: Vec<&str> = glob.trim_matches('/').split('/').collect();
    let actual: Vec<&str> = path.trim_matches('/').split('/').collect();
    if pattern.len() != actual.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, segment) in pattern.iter().zip(actual.iter()) {
        match expected.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) if !segment.is_empty() => {
                params.insert(name.to_string(), (*segment).to_string());
            }
            Some(_) => return None,
            None if expected == segment => {}
            None => return None,
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterguard_authz::prelude::Action;
    use rosterguard_types::prelude::ResourceKind;

    fn policy() -> RoutePolicy {
        RoutePolicy::new(vec![
            RoutePolicySpec::http("GET", "/api/players/{id}", ResourceKind::Player, Action::View)
                .target("id"),
            RoutePolicySpec::http("POST", "/api/players", ResourceKind::Player, Action::Create),
            RoutePolicySpec::http("GET", "/api/public/*", ResourceKind::Team, Action::View),
        ])
    }

    #[test]
    fn captures_named_segments() {
        let policy = policy();
        let m = policy.match_http("get", "/api/players/p-7").expect("match");
        assert_eq!(m.params.get("id").map(String::as_str), Some("p-7"));
        assert_eq!(m.spec.bind.action, Action::View);
    }

    #[test]
    fn method_and_length_must_agree() {
        let policy = policy();
        assert!(policy.match_http("DELETE", "/api/players/p-7").is_none());
        assert!(policy.match_http("GET", "/api/players/p-7/stats").is_none());
        assert!(policy.match_http("GET", "/api/players/").is_none());
        assert!(policy.match_http("POST", "/api/players/").is_some());
    }

    #[test]
    fn trailing_star_matches_prefix() {
        let policy = policy();
        let m = policy.match_http("GET", "/api/public/teams/1").expect("match");
        assert!(m.params.is_empty());
    }
}
