use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;

pub struct ResponseStampStage;

#[async_trait]
impl Stage for ResponseStampStage {
    async fn handle(
        &self,
        cx: &mut InterceptContext,
        _req: &mut dyn ProtoRequest,
        rsp: &mut dyn ProtoResponse,
    ) -> Result<StageOutcome, InterceptError> {
        rsp.insert_header("X-Request-Id", &cx.request_id);
        if let Some(info) = &cx.rate_limit {
            rsp.insert_header("X-RateLimit-Limit", &info.limit.to_string());
            rsp.insert_header("X-RateLimit-Remaining", &info.remaining.to_string());
            rsp.insert_header("X-RateLimit-Reset", &info.reset_at_ms.to_string());
        }
        Ok(StageOutcome::Continue)
    }
}
