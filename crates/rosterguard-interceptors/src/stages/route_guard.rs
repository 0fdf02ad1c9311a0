use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;

/// Stops requests that matched no declared route. Runs after the limiter so
/// undeclared paths still spend budget.
pub struct RouteGuardStage;

#[async_trait]
impl Stage for RouteGuardStage {
    async fn handle(
        &self,
        cx: &mut InterceptContext,
        _req: &mut dyn ProtoRequest,
        _rsp: &mut dyn ProtoResponse,
    ) -> Result<StageOutcome, InterceptError> {
        if cx.route.is_none() {
            return Err(InterceptError::forbidden("route not declared"));
        }
        Ok(StageOutcome::Continue)
    }
}
