use crate::action::Action;
use crate::model::Decision;
use rosterguard_types::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthDecisionEvent {
    pub actor_id: ActorId,
    pub role: Role,
    pub action: Action,
    #[serde(default)]
    pub resource_kind: Option<ResourceKind>,
    pub allow: bool,
    pub reason: String,
}

impl AuthDecisionEvent {
    pub fn new(
        actor: &Actor,
        action: Action,
        resource_kind: Option<ResourceKind>,
        decision: &Decision,
    ) -> Self {
        Self {
            actor_id: actor.id.clone(),
            role: actor.role,
            action,
            resource_kind,
            allow: decision.allow,
            reason: decision.reason.as_str().to_string(),
        }
    }

    pub fn emit(&self) {
        tracing::info!(
            target: "rosterguard::audit",
            actor = %self.actor_id,
            role = %self.role,
            action = %self.action,
            resource = self.resource_kind.map(|k| k.as_str()).unwrap_or("-"),
            allow = self.allow,
            reason = %self.reason,
            "authorization decision"
        );
    }
}
