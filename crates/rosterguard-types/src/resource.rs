#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::id::TeamId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Team,
    Player,
    Game,
    Tournament,
    TrainingPlan,
    TrainingSession,
    Invitation,
    StaffMember,
}

impl ResourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Team => "TEAM",
            ResourceKind::Player => "PLAYER",
            ResourceKind::Game => "GAME",
            ResourceKind::Tournament => "TOURNAMENT",
            ResourceKind::TrainingPlan => "TRAINING_PLAN",
            ResourceKind::TrainingSession => "TRAINING_SESSION",
            ResourceKind::Invitation => "INVITATION",
            ResourceKind::StaffMember => "STAFF_MEMBER",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource kind: {0}")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "TEAM" => Ok(ResourceKind::Team),
            "PLAYER" => Ok(ResourceKind::Player),
            "GAME" => Ok(ResourceKind::Game),
            "TOURNAMENT" => Ok(ResourceKind::Tournament),
            "TRAINING_PLAN" => Ok(ResourceKind::TrainingPlan),
            "TRAINING_SESSION" => Ok(ResourceKind::TrainingSession),
            "INVITATION" => Ok(ResourceKind::Invitation),
            "STAFF_MEMBER" | "STAFF" => Ok(ResourceKind::StaffMember),
            _ => Err(UnknownResourceKind(s.to_string())),
        }
    }
}

/// Minimal projection of a domain entity needed for an ownership check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ResourceRef {
    #[serde(default, rename = "teamId", skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
}

impl ResourceRef {
    pub fn owned_by(team: impl Into<TeamId>) -> Self {
        Self {
            team_id: Some(team.into()),
        }
    }

    pub fn unowned() -> Self {
        Self { team_id: None }
    }
}
