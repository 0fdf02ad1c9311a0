use crate::action::Action;
use crate::model::Decision;
use rosterguard_types::prelude::{Actor, ResourceRef};

pub mod table;

/// Permission decision point consulted by the middleware.
pub trait Authorizer: Send + Sync {
    fn decide(&self, actor: &Actor, resource: &ResourceRef, action: Action) -> Decision;
}
