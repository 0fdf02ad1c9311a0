#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::id::{ActorId, TeamId};

/// Fixed role enumeration carried by every authenticated actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperUser,
    Admin,
    Coach,
    Viewer,
    Player,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::SuperUser,
        Role::Admin,
        Role::Coach,
        Role::Viewer,
        Role::Player,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::SuperUser => "SUPER_USER",
            Role::Admin => "ADMIN",
            Role::Coach => "COACH",
            Role::Viewer => "VIEWER",
            Role::Player => "PLAYER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "SUPER_USER" | "SUPERUSER" => Ok(Role::SuperUser),
            "ADMIN" => Ok(Role::Admin),
            "COACH" => Ok(Role::Coach),
            "VIEWER" => Ok(Role::Viewer),
            "PLAYER" => Ok(Role::Player),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// The authenticated identity making a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
    #[serde(default, rename = "teamId", skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
}

impl Actor {
    pub fn new(id: impl Into<ActorId>, role: Role, team_id: Option<TeamId>) -> Self {
        Self {
            id: id.into(),
            role,
            team_id,
        }
    }
}
