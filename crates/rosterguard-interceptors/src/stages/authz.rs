use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;
use rosterguard_authz::prelude::{AuthDecisionEvent, Authorizer};
use rosterguard_types::prelude::ResourceRef;
use std::sync::Arc;

pub struct AuthzStage {
    pub authorizer: Arc<dyn Authorizer>,
}

#[async_trait]
impl Stage for AuthzStage {
    async fn handle(
        &self,
        cx: &mut InterceptContext,
        _req: &mut dyn ProtoRequest,
        _rsp: &mut dyn ProtoResponse,
    ) -> Result<StageOutcome, InterceptError> {
        let Some(actor) = cx.actor.as_ref() else {
            return Err(InterceptError::unauthenticated("no actor resolved"));
        };
        let Some(binding) = cx.route.as_ref() else {
            return Err(InterceptError::forbidden("route not declared"));
        };
        let unowned = ResourceRef::unowned();
        let resource = cx.resource.as_ref().unwrap_or(&unowned);

        let decision = self.authorizer.decide(actor, resource, binding.action);
        AuthDecisionEvent::new(actor, binding.action, Some(binding.resource), &decision).emit();

        if decision.allow {
            Ok(StageOutcome::Continue)
        } else {
            Err(InterceptError::forbidden(decision.reason.as_str()))
        }
    }
}
