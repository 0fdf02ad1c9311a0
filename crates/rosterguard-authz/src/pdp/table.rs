use super::*;
use crate::observe;

/// [`Authorizer`] backed by the static role table in [`crate::table`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RoleTableAuthorizer;

impl Authorizer for RoleTableAuthorizer {
    fn decide(&self, actor: &Actor, resource: &ResourceRef, action: Action) -> Decision {
        let decision = crate::table::evaluate(
            actor.role,
            actor.team_id.as_ref(),
            resource.team_id.as_ref(),
            action,
        );
        tracing::debug!(
            actor = %actor.id,
            labels = ?observe::labels(actor.role, action, &decision),
            "role table evaluated"
        );
        decision
    }
}
