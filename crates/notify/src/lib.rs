//! In-app and email notification delivery for EchoTasks.
//!
//! Notifications are delivered inline with the request that triggers
//! them: the [`Notifier`] inserts an in-app notification row and, when
//! SMTP is configured, sends a best-effort email copy. There is no
//! background queue; a delivery failure is logged and never propagated
//! to the caller.

pub mod email;
pub mod notifier;

pub use email::{EmailConfig, EmailDelivery};
pub use notifier::Notifier;
