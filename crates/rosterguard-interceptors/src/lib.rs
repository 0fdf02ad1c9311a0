//! Admission interceptor chain.
//!
//! A protected request runs, in order: context init, actor resolution, route
//! binding, rate limiting, owning-team lookup, permission check and response
//! stamping. The first failing stage ends the request with a rejection
//! response; the handler only runs when every stage continues.

#[cfg(feature = "with-axum")]
pub mod adapters;
pub mod context;
pub mod errors;
pub mod observe;
pub mod policy;
pub mod prelude;
pub mod presets;
pub mod stages;

pub use stages::{InterceptorChain, Stage, StageOutcome};
