//! Movies Review Service: review CRUD.
//!
//! Stores `Review` records keyed loosely by `movieInfoId`, validates them
//! before persistence, and publishes each new review to a replay-all relay
//! served at `/v1/reviews/stream`.

pub mod application;
pub mod routes;
pub mod state;
