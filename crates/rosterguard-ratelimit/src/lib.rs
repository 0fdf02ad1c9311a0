//! Admission limiter for rosterguard routes.
//!
//! A [`WindowStore`](store::WindowStore) counts requests per key inside fixed
//! windows. A [`RateLimiter`](limiter::RateLimiter) applies a named
//! [`RateLimitPolicy`](policy::RateLimitPolicy) to a request identity and
//! returns an admit/reject [`Decision`](limiter::Decision) with the metadata
//! clients need to back off.

pub mod errors;
pub mod identity;
pub mod limiter;
pub mod observe;
pub mod policy;
pub mod prelude;
pub mod store;
