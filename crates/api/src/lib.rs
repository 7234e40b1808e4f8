//! EchoTasks API server library.
//!
//! Exposes the core building blocks (config, state, error handling,
//! lifecycle engine, routes) so integration tests and the binary
//! entrypoint can both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod files;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod routes;
pub mod state;
