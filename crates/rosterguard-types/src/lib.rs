pub mod actor;
pub mod id;
pub mod prelude;
pub mod resource;
pub mod time;
