use crate::limiter::Decision;
use crate::policy::RateLimitPolicy;
use std::collections::BTreeMap;

pub fn labels(policy: &RateLimitPolicy, decision: &Decision) -> BTreeMap<&'static str, String> {
    let mut map = BTreeMap::new();
    map.insert("policy", policy.name().to_string());
    map.insert("limit", policy.max_requests().to_string());
    map.insert("admitted", decision.is_admitted().to_string());
    map
}
