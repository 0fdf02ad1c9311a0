use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;
use rosterguard_authz::prelude::ActorProvider;
use rosterguard_errors::prelude::ErrorKind;
use std::sync::Arc;

/// Resolves the calling actor. Fails before any counter or store is touched.
pub struct AuthnMapStage {
    pub actors: Arc<dyn ActorProvider>,
}

#[async_trait]
impl Stage for AuthnMapStage {
    async fn handle(
        &self,
        cx: &mut InterceptContext,
        _req: &mut dyn ProtoRequest,
        _rsp: &mut dyn ProtoResponse,
    ) -> Result<StageOutcome, InterceptError> {
        if cx.credentials.token().is_none() {
            return Err(InterceptError::unauthenticated("no credentials presented"));
        }

        let actor = self
            .actors
            .current_actor(&cx.credentials)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::Unauthenticated | ErrorKind::Internal => {
                    InterceptError::from_error(err.into_inner())
                }
                _ => InterceptError::unauthenticated("actor provider rejected credentials"),
            })?;
        cx.actor = Some(actor);
        Ok(StageOutcome::Continue)
    }
}
