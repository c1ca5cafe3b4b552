//! Movies Core: shared domain types and contracts.
//!
//! This crate defines the records exchanged between the catalog services,
//! the validation rules applied before persistence, the store traits the
//! CRUD services depend on, and the replay relay behind every `/stream`
//! endpoint. It contains no HTTP or database code.

pub mod domain;
pub mod error;
pub mod relay;
pub mod repository;
pub mod validation;
