pub mod app;
pub mod commands;
pub mod env;
pub mod runtime;

pub use app::run;
