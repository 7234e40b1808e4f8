//! Project lifecycle engine.
//!
//! Every operation here is an ordered sequence of effects with an
//! explicit failure policy per step: the primary mutation aborts the
//! operation on error, secondary mutations log and continue, and
//! notifications are fire-and-forget (the [`Notifier`] swallows its own
//! failures).
//!
//! [`Notifier`]: echotasks_notify::Notifier

pub mod changes;
pub mod proposals;
pub mod requests;
pub mod updates;
