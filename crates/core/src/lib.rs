//! EchoTasks domain core.
//!
//! Pure domain logic shared by the database layer, notifier, and API
//! server: status state machines, progress computation, notification
//! message composition, role constants, and the common error taxonomy.
//! This crate performs no I/O and has no internal dependencies.

pub mod error;
pub mod messages;
pub mod progress;
pub mod roles;
pub mod status;
pub mod types;
