//! Built-in route table for the demo server and route validation.
//!
//! Deployments normally declare their routes in the `routes` section of the
//! configuration file; this table applies when that section is empty.

use crate::config::ConfigError;
use rosterguard_authz::prelude::Action;
use rosterguard_interceptors::prelude::RoutePolicySpec;
use rosterguard_ratelimit::policy::{AUTH_POLICY, SENSITIVE_POLICY};
use rosterguard_ratelimit::prelude::PolicySet;
use rosterguard_types::prelude::ResourceKind;

/// Path of the login route served through the public chain.
pub const LOGIN_PATH: &str = "/api/auth/login";

pub fn default_routes() -> Vec<RoutePolicySpec> {
    use Action::*;
    use ResourceKind::*;

    vec![
        RoutePolicySpec::http("POST", LOGIN_PATH, Team, View).rate_limit(AUTH_POLICY),
        RoutePolicySpec::http("GET", "/api/teams/{teamId}", Team, View).target("teamId"),
        RoutePolicySpec::http("POST", "/api/teams", Team, Create).rate_limit(SENSITIVE_POLICY),
        RoutePolicySpec::http("PUT", "/api/teams/{teamId}", Team, Edit).target("teamId"),
        RoutePolicySpec::http("DELETE", "/api/teams/{teamId}", Team, Delete)
            .target("teamId")
            .rate_limit(SENSITIVE_POLICY),
        RoutePolicySpec::http("POST", "/api/teams/{teamId}/invitations", Team, ManageInvitations)
            .target("teamId"),
        RoutePolicySpec::http("POST", "/api/teams/{teamId}/staff", Team, ManageStaff)
            .target("teamId")
            .rate_limit(SENSITIVE_POLICY),
        RoutePolicySpec::http("GET", "/api/players/{playerId}", Player, View).target("playerId"),
        RoutePolicySpec::http("POST", "/api/players", Player, Create),
        RoutePolicySpec::http("PUT", "/api/players/{playerId}", Player, Edit).target("playerId"),
        RoutePolicySpec::http("DELETE", "/api/players/{playerId}", Player, Delete)
            .target("playerId")
            .rate_limit(SENSITIVE_POLICY),
        RoutePolicySpec::http("GET", "/api/games/{gameId}", Game, View).target("gameId"),
        RoutePolicySpec::http("POST", "/api/games", Game, Create),
        RoutePolicySpec::http("PUT", "/api/games/{gameId}", Game, Edit).target("gameId"),
        RoutePolicySpec::http("POST", "/api/games/{gameId}/players", Game, AddPlayerToGame)
            .target("gameId"),
        RoutePolicySpec::http("GET", "/api/tournaments/{tournamentId}", Tournament, View)
            .target("tournamentId"),
        RoutePolicySpec::http("PUT", "/api/tournaments/{tournamentId}", Tournament, Edit)
            .target("tournamentId"),
        RoutePolicySpec::http("GET", "/api/training-plans/{planId}", TrainingPlan, View)
            .target("planId"),
        RoutePolicySpec::http("PUT", "/api/training-plans/{planId}", TrainingPlan, Edit)
            .target("planId"),
        RoutePolicySpec::http("POST", "/api/training-sessions", TrainingSession, Create),
    ]
}

/// A route must name a known policy and capture the segment it targets.
pub fn check_route(spec: &RoutePolicySpec, policies: &PolicySet) -> Result<(), ConfigError> {
    let path = spec.path_glob();
    let invalid = |reason: String| ConfigError::Route {
        route: path.to_string(),
        reason,
    };

    if !path.starts_with('/') {
        return Err(invalid("path must start with '/'".into()));
    }
    if let Some(name) = &spec.bind.rate_limit {
        if policies.get(name).is_none() {
            return Err(invalid(format!("unknown rate-limit policy '{name}'")));
        }
    }
    if let Some(param) = &spec.bind.target_param {
        let capture = format!("{{{param}}}");
        if !path.split('/').any(|segment| segment == capture) {
            return Err(invalid(format!("target_param '{param}' is not captured")));
        }
    }
    Ok(())
}
