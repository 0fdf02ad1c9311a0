use crate::errors::AuthError;
use async_trait::async_trait;
use rosterguard_types::prelude::{ResourceId, ResourceKind, ResourceRef};

#[cfg(feature = "directory-memory")]
pub mod memory;

/// Resource store adapter: the owning-team projection of an existing entity.
///
/// `Ok(None)` means the resource does not exist. `Err` means the store
/// failed and the caller must not treat it as an answer.
#[async_trait]
pub trait ResourceOwnerLookup: Send + Sync {
    async fn owner_of(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<Option<ResourceRef>, AuthError>;
}
