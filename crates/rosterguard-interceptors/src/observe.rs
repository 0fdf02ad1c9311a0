use crate::context::RouteBinding;
use rosterguard_errors::model::ErrorObj;
use std::collections::BTreeMap;

/// Log labels for a request, plus the error's own labels when it failed.
pub fn labels(
    route: Option<&RouteBinding>,
    err: Option<&ErrorObj>,
) -> BTreeMap<&'static str, String> {
    let mut map = match err {
        Some(err) => rosterguard_errors::labels::labels(err),
        None => BTreeMap::new(),
    };
    match route {
        Some(binding) => {
            map.insert("route", binding.pattern.clone());
            map.insert("resource", binding.resource.as_str().to_string());
            map.insert("action", binding.action.as_str().to_string());
        }
        None => {
            map.insert("route", "undeclared".to_string());
        }
    }
    map
}
