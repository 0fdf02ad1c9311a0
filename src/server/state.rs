use std::sync::Arc;

use rosterguard_authz::prelude::{MemoryResourceDirectory, RoleTableAuthorizer, StaticActorProvider};
use rosterguard_interceptors::prelude::{protected_chain, public_chain, AdmissionDeps};
use rosterguard_interceptors::InterceptorChain;
use rosterguard_ratelimit::prelude::{RateLimiter, SweepTrigger};
use rosterguard_types::prelude::{Clock, SystemClock, TeamId};

use crate::config::{AppConfig, ConfigError};

#[derive(Clone)]
pub struct AppState {
    pub protected: Arc<InterceptorChain>,
    pub public: Arc<InterceptorChain>,
    pub actors: Arc<StaticActorProvider>,
    pub directory: Arc<MemoryResourceDirectory>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let validated = config.validate()?;

        let actors = Arc::new(StaticActorProvider::with_actors(validated.actors));
        let directory = Arc::new(MemoryResourceDirectory::new());
        for resource in &config.demo.resources {
            directory.insert(
                resource.kind,
                resource.id.as_str(),
                resource.team_id.as_deref().map(TeamId::from),
            );
        }

        let sweep = if config.rate_limit.sweep_probability > 0.0 {
            SweepTrigger::Probabilistic(config.rate_limit.sweep_probability)
        } else {
            SweepTrigger::Never
        };
        let limiter = Arc::new(RateLimiter::new(clock, sweep));

        let deps = AdmissionDeps {
            actors: actors.clone(),
            resources: directory.clone(),
            authorizer: Arc::new(RoleTableAuthorizer),
            limiter: limiter.clone(),
            policies: validated.policies,
            routes: validated.routes,
        };

        Ok(Self {
            protected: Arc::new(protected_chain(&deps)),
            public: Arc::new(public_chain(&deps)),
            actors,
            directory,
            limiter,
        })
    }
}
