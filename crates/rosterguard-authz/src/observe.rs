use crate::action::Action;
use crate::model::Decision;
use rosterguard_types::prelude::Role;
use std::collections::BTreeMap;

pub fn labels(role: Role, action: Action, decision: &Decision) -> BTreeMap<&'static str, String> {
    let mut map = BTreeMap::new();
    map.insert("role", role.as_str().to_string());
    map.insert("action", action.as_str().to_string());
    map.insert("allow", decision.allow.to_string());
    map.insert("reason", decision.reason.as_str().to_string());
    map
}
