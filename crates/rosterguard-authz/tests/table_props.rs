use proptest::prelude::*;
use rosterguard_authz::prelude::*;
use rosterguard_types::prelude::*;

fn role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn team() -> impl Strategy<Value = Option<TeamId>> {
    prop::option::of(prop::sample::select(vec!["T1", "T2", "T3"]).prop_map(TeamId::from))
}

proptest! {
    #[test]
    fn admins_are_allowed_everything(
        role in prop::sample::select(vec![Role::SuperUser, Role::Admin]),
        action in action(),
        mine in team(),
        theirs in team(),
    ) {
        prop_assert!(permits(role, mine.as_ref(), theirs.as_ref(), action));
    }

    #[test]
    fn viewers_only_view_and_add_players(action in action(), mine in team(), theirs in team()) {
        let allowed = permits(Role::Viewer, mine.as_ref(), theirs.as_ref(), action);
        prop_assert_eq!(allowed, matches!(action, Action::View | Action::AddPlayerToGame));
    }

    #[test]
    fn coach_edit_iff_both_present_and_equal(mine in team(), theirs in team()) {
        let allowed = can_edit(Role::Coach, mine.as_ref(), theirs.as_ref());
        let expected = matches!((&mine, &theirs), (Some(a), Some(b)) if a == b);
        prop_assert_eq!(allowed, expected);
    }

    #[test]
    fn team_ids_only_matter_for_coach_edit(
        role in role(),
        action in action(),
        mine in team(),
        theirs in team(),
    ) {
        prop_assume!(!(role == Role::Coach && action == Action::Edit));
        prop_assert_eq!(
            permits(role, mine.as_ref(), theirs.as_ref(), action),
            permits(role, None, None, action)
        );
    }
}
