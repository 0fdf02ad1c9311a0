use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;
use rosterguard_authz::prelude::ResourceOwnerLookup;
use rosterguard_errors::prelude::ErrorKind;
use rosterguard_types::prelude::ResourceRef;
use std::sync::Arc;

/// Loads the owning team of the targeted resource. Routes without a target
/// get an unowned reference.
pub struct ResourceOwnerStage {
    pub lookup: Arc<dyn ResourceOwnerLookup>,
}

#[async_trait]
impl Stage for ResourceOwnerStage {
    async fn handle(
        &self,
        cx: &mut InterceptContext,
        _req: &mut dyn ProtoRequest,
        _rsp: &mut dyn ProtoResponse,
    ) -> Result<StageOutcome, InterceptError> {
        let Some(binding) = cx.route.as_ref() else {
            return Err(InterceptError::forbidden("route not declared"));
        };
        let Some(id) = binding.target.as_ref() else {
            cx.resource = Some(ResourceRef::unowned());
            return Ok(StageOutcome::Continue);
        };

        let resource = match self.lookup.owner_of(binding.resource, id).await {
            Ok(Some(resource)) => resource,
            Ok(None) => {
                return Err(InterceptError::not_found(&format!(
                    "{} {id} does not exist",
                    binding.resource.as_str()
                )))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(InterceptError::from_error(err.into_inner()))
            }
            Err(err) => {
                tracing::error!(
                    resource = binding.resource.as_str(),
                    id = %id,
                    error = ?err.0.message_dev,
                    "resource owner lookup failed"
                );
                return Err(InterceptError::internal("resource owner lookup failed"));
            }
        };
        cx.resource = Some(resource);
        Ok(StageOutcome::Continue)
    }
}
