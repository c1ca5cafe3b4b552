//! Application-level handlers for reviews.

pub mod command_handlers;
pub mod query_handlers;
