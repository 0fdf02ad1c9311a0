pub use crate::context::{InterceptContext, ProtoRequest, ProtoResponse, RouteBinding};
pub use crate::errors::{rejection_headers, to_http_response, write_rejection, InterceptError};
pub use crate::policy::dsl::{RouteMatch, RoutePolicy};
pub use crate::policy::model::{MatchCond, RouteBindingSpec, RoutePolicySpec};
pub use crate::presets::{protected_chain, public_chain, AdmissionDeps};
pub use crate::stages::{
    authn_map::AuthnMapStage, authz::AuthzStage, context_init::ContextInitStage,
    rate_limit::RateLimitStage, resource_owner::ResourceOwnerStage,
    response_stamp::ResponseStampStage, route_guard::RouteGuardStage, route_policy::RoutePolicyStage,
    InterceptorChain, Stage, StageOutcome,
};
