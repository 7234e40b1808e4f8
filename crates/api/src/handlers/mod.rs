//! HTTP handlers, one module per resource.

pub mod auth;
pub mod change_request;
pub mod client;
pub mod comment;
pub mod dashboard;
pub mod milestone;
pub mod notification;
pub mod profile;
pub mod project;
pub mod project_request;
pub mod search;
pub mod update;
pub mod upload;
