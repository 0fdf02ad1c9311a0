pub use crate::errors::PolicyError;
pub use crate::identity::{RequestIdentity, UNKNOWN_CLIENT};
pub use crate::limiter::{Decision, RateLimitInfo, RateLimiter, Rejection, SweepTrigger};
pub use crate::policy::{KeyStrategy, PolicySet, PolicySpec, RateLimitPolicy};
pub use crate::store::{WindowSnapshot, WindowStore};
