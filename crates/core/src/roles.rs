//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `profiles.role` in
//! `20260301000001_create_profiles.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "client";
