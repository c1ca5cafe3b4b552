//! Movies HTTP: axum plumbing shared by the catalog services.
//!
//! Each service binary builds its own router and state, then relies on this
//! crate for error mapping, the health endpoint, NDJSON streaming, listener
//! configuration, and tracing setup.

pub mod config;
pub mod error;
pub mod health;
pub mod ndjson;
pub mod server;
