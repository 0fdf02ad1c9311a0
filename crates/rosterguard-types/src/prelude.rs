pub use crate::{
    actor::{Actor, Role, UnknownRole},
    id::{ActorId, ResourceId, TeamId},
    resource::{ResourceKind, ResourceRef, UnknownResourceKind},
    time::{Clock, ManualClock, SystemClock, Timestamp},
};
