//! Movies service: composes metadata and reviews fetched from the two
//! catalog services and forwards the metadata live-update stream.

pub mod client;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod routes;
pub mod state;
