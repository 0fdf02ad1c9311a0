use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::{write_rejection, InterceptError};
use async_trait::async_trait;
use futures::future::BoxFuture;

pub mod authn_map;
pub mod authz;
pub mod context_init;
pub mod rate_limit;
pub mod resource_owner;
pub mod response_stamp;
pub mod route_guard;
pub mod route_policy;

#[async_trait]
pub trait Stage: Send + Sync {
    async fn handle(
        &self,
        cx: &mut InterceptContext,
        req: &mut dyn ProtoRequest,
        rsp: &mut dyn ProtoResponse,
    ) -> Result<StageOutcome, InterceptError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageOutcome {
    Continue,
    ShortCircuit,
}

pub struct InterceptorChain {
    stages: Vec<Box<dyn Stage>>,
}

impl InterceptorChain {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs every stage, then `handler`. The first failure is written to
    /// `rsp` as a rejection and also returned; later stages and the handler
    /// are skipped.
    pub async fn run_with_handler<F>(
        &self,
        mut cx: InterceptContext,
        req: &mut dyn ProtoRequest,
        rsp: &mut dyn ProtoResponse,
        handler: F,
    ) -> Result<(), InterceptError>
    where
        F: for<'a> FnOnce(
                &'a mut InterceptContext,
                &'a mut dyn ProtoRequest,
            ) -> BoxFuture<'a, Result<serde_json::Value, InterceptError>>
            + Send,
    {
        for stage in &self.stages {
            match stage.handle(&mut cx, req, rsp).await {
                Ok(StageOutcome::Continue) => {}
                Ok(StageOutcome::ShortCircuit) => return Ok(()),
                Err(err) => return reject(&cx, rsp, err).await,
            }
        }

        match handler(&mut cx, req).await {
            Ok(body) => {
                rsp.set_status(200);
                rsp.write_json(&body).await
            }
            Err(err) => reject(&cx, rsp, err).await,
        }
    }
}

async fn reject(
    cx: &InterceptContext,
    rsp: &mut dyn ProtoResponse,
    err: InterceptError,
) -> Result<(), InterceptError> {
    let err = err.with_correlation(&cx.request_id);
    let labels = crate::observe::labels(cx.route.as_ref(), Some(&err.0));
    if err.0.severity.is_fault() {
        tracing::error!(
            status = err.0.http_status,
            labels = ?labels,
            error = ?err.0.message_dev,
            "request failed"
        );
    } else {
        tracing::debug!(status = err.0.http_status, labels = ?labels, "request rejected");
    }
    write_rejection(rsp, &err).await?;
    Err(err)
}
