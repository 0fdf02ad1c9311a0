use crate::policy::dsl::RoutePolicy;
use crate::stages::{
    authn_map::AuthnMapStage, authz::AuthzStage, context_init::ContextInitStage,
    rate_limit::RateLimitStage, resource_owner::ResourceOwnerStage,
    response_stamp::ResponseStampStage, route_guard::RouteGuardStage, route_policy::RoutePolicyStage,
    InterceptorChain,
};
use rosterguard_authz::prelude::{ActorProvider, Authorizer, ResourceOwnerLookup};
use rosterguard_ratelimit::prelude::{PolicySet, RateLimiter};
use std::sync::Arc;

/// Everything the admission stages consult.
#[derive(Clone)]
pub struct AdmissionDeps {
    pub actors: Arc<dyn ActorProvider>,
    pub resources: Arc<dyn ResourceOwnerLookup>,
    pub authorizer: Arc<dyn Authorizer>,
    pub limiter: Arc<RateLimiter>,
    pub policies: PolicySet,
    pub routes: RoutePolicy,
}

/// authn → route → rate limit → route guard → ownership → authz → stamp.
pub fn protected_chain(deps: &AdmissionDeps) -> InterceptorChain {
    InterceptorChain::new(vec![
        Box::new(ContextInitStage::default()),
        Box::new(AuthnMapStage {
            actors: deps.actors.clone(),
        }),
        Box::new(RoutePolicyStage {
            policy: deps.routes.clone(),
        }),
        Box::new(RateLimitStage {
            limiter: deps.limiter.clone(),
            policies: deps.policies.clone(),
        }),
        Box::new(RouteGuardStage),
        Box::new(ResourceOwnerStage {
            lookup: deps.resources.clone(),
        }),
        Box::new(AuthzStage {
            authorizer: deps.authorizer.clone(),
        }),
        Box::new(ResponseStampStage),
    ])
}

/// Rate limiting and the route guard only, for unauthenticated entry points
/// such as login.
pub fn public_chain(deps: &AdmissionDeps) -> InterceptorChain {
    InterceptorChain::new(vec![
        Box::new(ContextInitStage::default()),
        Box::new(RoutePolicyStage {
            policy: deps.routes.clone(),
        }),
        Box::new(RateLimitStage {
            limiter: deps.limiter.clone(),
            policies: deps.policies.clone(),
        }),
        Box::new(RouteGuardStage),
        Box::new(ResponseStampStage),
    ])
}
