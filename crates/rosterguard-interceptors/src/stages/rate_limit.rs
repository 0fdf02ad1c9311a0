use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;
use rosterguard_ratelimit::prelude::{Decision, PolicySet, RateLimiter, RequestIdentity};
use std::sync::Arc;

/// Counts the request against its route's policy (or the set default).
///
/// The route part of the key is `<METHOD> <pattern>`, so each declared route
/// owns its budget. Undeclared requests are charged to the default policy
/// under their concrete path.
pub struct RateLimitStage {
    pub limiter: Arc<RateLimiter>,
    pub policies: PolicySet,
}

#[async_trait]
impl Stage for RateLimitStage {
    async fn handle(
        &self,
        cx: &mut InterceptContext,
        req: &mut dyn ProtoRequest,
        _rsp: &mut dyn ProtoResponse,
    ) -> Result<StageOutcome, InterceptError> {
        let method = req.method().to_ascii_uppercase();
        let (named, route) = match cx.route.as_ref() {
            Some(binding) => (
                binding.rate_limit.as_deref(),
                format!("{method} {}", binding.pattern),
            ),
            None => (None, format!("{method} {}", req.path())),
        };
        let policy = self
            .policies
            .resolve(named)
            .map_err(|err| InterceptError::from_error(err.into_error_obj()))?;

        let identity = RequestIdentity::new(cx.client_addr.clone(), route);
        match self.limiter.check(&policy, &identity) {
            Decision::Admit(info) => {
                cx.rate_limit = Some(info);
                Ok(StageOutcome::Continue)
            }
            Decision::Reject(rejection) => {
                Err(InterceptError::rate_limited(&rejection, policy.name()))
            }
        }
    }
}
