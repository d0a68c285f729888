//! Typed resource bindings.
//!
//! Each binding is a serde struct implementing
//! [`RestResource`](super::RestResource); the full API surface has many
//! more, all following the same pattern.

mod account;
mod job;
mod server;

pub use account::Account;
pub use job::{Job, WaitOptions};
pub use server::Server;
