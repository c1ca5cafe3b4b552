//! Shared test mocks and utilities for the movie catalog services.

mod fixtures;
mod repository;
mod upstream;

pub use fixtures::{batman_begins, dark_knight, review_for};
pub use repository::{FailingMovieInfoRepository, FailingReviewRepository};
pub use upstream::StubUpstream;
