//! The resource layer: generic call classification, typed bindings, change
//! tracking, and validation.

mod errors;
mod resource;
pub mod resources;
mod schema;
mod tracking;
pub mod validate;

pub use errors::ResourceError;
pub use resource::{CallOutcome, Resource};
pub use schema::{Entity, RestResource};
pub use tracking::{ChangeSet, PendingChange};
