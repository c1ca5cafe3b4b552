//! Application-level handlers: validate, persist, publish.

pub mod command_handlers;
pub mod query_handlers;
