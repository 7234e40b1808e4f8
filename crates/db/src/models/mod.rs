//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where needed, an update DTO (all `Option` fields) for patches
//!
//! Joined query shapes get their own tagged structs (for example
//! [`project::ProjectWithClient`]) instead of one permissive row type
//! guarded by null checks.

pub mod change_request;
pub mod comment;
pub mod milestone;
pub mod notification;
pub mod profile;
pub mod project;
pub mod project_request;
pub mod session;
pub mod update;
