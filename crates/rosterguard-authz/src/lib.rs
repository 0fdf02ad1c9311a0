pub mod action;
pub mod authn;
pub mod directory;
pub mod errors;
pub mod events;
pub mod model;
pub mod observe;
pub mod pdp;
pub mod prelude;
pub mod table;
