use crate::context::{InterceptContext, ProtoRequest, ProtoResponse, RouteBinding};
use crate::errors::InterceptError;
use crate::policy::dsl::RoutePolicy;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;
use rosterguard_types::prelude::ResourceId;

/// Binds the request to its declared route. A miss leaves `cx.route` empty
/// for the limiter and [`RouteGuardStage`](super::route_guard::RouteGuardStage).
pub struct RoutePolicyStage {
    pub policy: RoutePolicy,
}

#[async_trait]
impl Stage for RoutePolicyStage {
    async fn handle(
        &self,
        cx: &mut InterceptContext,
        req: &mut dyn ProtoRequest,
        _rsp: &mut dyn ProtoResponse,
    ) -> Result<StageOutcome, InterceptError> {
        let Some(matched) = self.policy.match_http(req.method(), req.path()) else {
            cx.route = None;
            return Ok(StageOutcome::Continue);
        };

        let bind = &matched.spec.bind;
        let target = match bind.target_param.as_deref() {
            Some(param) => match matched.params.get(param) {
                Some(id) => Some(ResourceId::from(id.as_str())),
                None => {
                    return Err(InterceptError::internal(&format!(
                        "route {} names missing capture {param}",
                        matched.spec.path_glob()
                    )))
                }
            },
            None => None,
        };

        cx.route = Some(RouteBinding {
            pattern: matched.spec.path_glob().to_string(),
            resource: bind.resource,
            action: bind.action,
            target,
            rate_limit: bind.rate_limit.clone(),
        });
        Ok(StageOutcome::Continue)
    }
}
