use super::*;
use parking_lot::RwLock;
use rosterguard_types::prelude::TeamId;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryResourceDirectory {
    entries: RwLock<HashMap<(ResourceKind, ResourceId), ResourceRef>>,
}

impl MemoryResourceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, kind: ResourceKind, id: impl Into<ResourceId>, team: Option<TeamId>) {
        self.entries
            .write()
            .insert((kind, id.into()), ResourceRef { team_id: team });
    }

    pub fn remove(&self, kind: ResourceKind, id: &ResourceId) -> Option<ResourceRef> {
        self.entries.write().remove(&(kind, id.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait::async_trait]
impl ResourceOwnerLookup for MemoryResourceDirectory {
    async fn owner_of(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<Option<ResourceRef>, AuthError> {
        Ok(self.entries.read().get(&(kind, id.clone())).cloned())
    }
}
