pub use crate::action::{Action, UnknownAction};
pub use crate::authn::{ActorProvider, Credentials};
#[cfg(feature = "authn-static")]
pub use crate::authn::static_tokens::StaticActorProvider;
pub use crate::directory::ResourceOwnerLookup;
#[cfg(feature = "directory-memory")]
pub use crate::directory::memory::MemoryResourceDirectory;
pub use crate::errors::AuthError;
pub use crate::events::AuthDecisionEvent;
pub use crate::model::{Decision, Reason};
pub use crate::pdp::{table::RoleTableAuthorizer, Authorizer};
pub use crate::table::{
    can_add_player_to_game, can_create, can_delete, can_edit, can_manage_invitations,
    can_manage_staff, can_view, evaluate, is_admin, permits,
};
