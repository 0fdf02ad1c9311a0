use serde::{Deserialize, Serialize};

/// Which table rule produced a decision. Logged and audited, never sent to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    RoleAllow,
    RoleDeny,
    TeamMatch,
    TeamMismatch,
    TeamAbsent,
}

impl Reason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Reason::RoleAllow => "role.allow",
            Reason::RoleDeny => "role.deny",
            Reason::TeamMatch => "team.match",
            Reason::TeamMismatch => "team.mismatch",
            Reason::TeamAbsent => "team.absent",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allow: bool,
    pub reason: Reason,
}

impl Decision {
    pub const fn allow(reason: Reason) -> Self {
        Self {
            allow: true,
            reason,
        }
    }

    pub const fn deny(reason: Reason) -> Self {
        Self {
            allow: false,
            reason,
        }
    }
}
