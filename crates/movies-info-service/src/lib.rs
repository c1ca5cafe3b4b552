//! Movies Info Service: movie metadata CRUD.
//!
//! Stores `MovieInfo` records, validates them before persistence, and
//! publishes each newly created record to a replay-all relay served at
//! `/api/v1/movies-info/stream`.

pub mod application;
pub mod routes;
pub mod state;
