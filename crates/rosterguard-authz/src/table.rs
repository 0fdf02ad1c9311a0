//! The permission table. Every route consults these functions; nothing else
//! in the workspace inspects roles directly.
//!
//! | Action             | SUPER_USER | ADMIN | COACH          | VIEWER | PLAYER |
//! |--------------------|------------|-------|----------------|--------|--------|
//! | VIEW               | allow      | allow | allow          | allow  | allow  |
//! | CREATE             | allow      | allow | allow          | deny   | deny   |
//! | EDIT               | allow      | allow | own team only  | deny   | deny   |
//! | DELETE             | allow      | allow | deny           | deny   | deny   |
//! | MANAGE_INVITATIONS | allow      | allow | deny           | deny   | deny   |
//! | MANAGE_STAFF       | allow      | allow | deny           | deny   | deny   |
//! | ADD_PLAYER_TO_GAME | allow      | allow | allow          | allow  | allow  |

use crate::action::Action;
use crate::model::{Decision, Reason};
use rosterguard_types::prelude::{Role, TeamId};

pub fn evaluate(
    role: Role,
    actor_team: Option<&TeamId>,
    resource_team: Option<&TeamId>,
    action: Action,
) -> Decision {
    use Action::*;
    use Role::*;

    match (role, action) {
        (SuperUser | Admin, _) => Decision::allow(Reason::RoleAllow),
        (_, View | AddPlayerToGame) => Decision::allow(Reason::RoleAllow),
        (Coach, Create) => Decision::allow(Reason::RoleAllow),
        (Coach, Edit) => match (actor_team, resource_team) {
            (Some(mine), Some(theirs)) if mine == theirs => Decision::allow(Reason::TeamMatch),
            (Some(_), Some(_)) => Decision::deny(Reason::TeamMismatch),
            _ => Decision::deny(Reason::TeamAbsent),
        },
        (Coach, Delete | ManageInvitations | ManageStaff) => Decision::deny(Reason::RoleDeny),
        (Viewer | Player, Create | Edit | Delete | ManageInvitations | ManageStaff) => {
            Decision::deny(Reason::RoleDeny)
        }
    }
}

pub fn permits(
    role: Role,
    actor_team: Option<&TeamId>,
    resource_team: Option<&TeamId>,
    action: Action,
) -> bool {
    evaluate(role, actor_team, resource_team, action).allow
}

pub fn is_admin(role: Role) -> bool {
    matches!(role, Role::SuperUser | Role::Admin)
}

pub fn can_view(role: Role) -> bool {
    permits(role, None, None, Action::View)
}

pub fn can_create(role: Role) -> bool {
    permits(role, None, None, Action::Create)
}

pub fn can_edit(role: Role, actor_team: Option<&TeamId>, resource_team: Option<&TeamId>) -> bool {
    permits(role, actor_team, resource_team, Action::Edit)
}

pub fn can_delete(role: Role) -> bool {
    permits(role, None, None, Action::Delete)
}

pub fn can_manage_invitations(role: Role) -> bool {
    permits(role, None, None, Action::ManageInvitations)
}

pub fn can_manage_staff(role: Role) -> bool {
    permits(role, None, None, Action::ManageStaff)
}

pub fn can_add_player_to_game(role: Role) -> bool {
    permits(role, None, None, Action::AddPlayerToGame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str) -> TeamId {
        TeamId::from(id)
    }

    #[test]
    fn coach_edit_requires_matching_present_teams() {
        let t1 = team("T1");
        let t2 = team("T2");
        assert!(can_edit(Role::Coach, Some(&t1), Some(&t1)));
        assert!(!can_edit(Role::Coach, Some(&t1), Some(&t2)));
        assert!(!can_edit(Role::Coach, Some(&t1), None));
        assert!(!can_edit(Role::Coach, None, Some(&t1)));
        assert!(!can_edit(Role::Coach, None, None));
    }

    #[test]
    fn deny_reasons_distinguish_mismatch_from_absence() {
        let t1 = team("T1");
        let t2 = team("T2");
        assert_eq!(
            evaluate(Role::Coach, Some(&t1), Some(&t2), Action::Edit).reason,
            Reason::TeamMismatch
        );
        assert_eq!(
            evaluate(Role::Coach, None, None, Action::Edit).reason,
            Reason::TeamAbsent
        );
        assert_eq!(
            evaluate(Role::Player, Some(&t1), Some(&t1), Action::Edit).reason,
            Reason::RoleDeny
        );
    }

    #[test]
    fn helpers_agree_with_table() {
        assert!(is_admin(Role::SuperUser));
        assert!(!is_admin(Role::Coach));
        assert!(can_create(Role::Coach));
        assert!(!can_delete(Role::Coach));
        assert!(!can_manage_staff(Role::Coach));
        assert!(!can_manage_invitations(Role::Viewer));
        assert!(can_add_player_to_game(Role::Player));
        assert!(can_view(Role::Viewer));
    }
}
