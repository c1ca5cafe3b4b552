//! Sample records used across test suites.

use chrono::NaiveDate;
use movies_core::domain::{MovieInfo, Review};

/// An unsaved "Batman Begins" record.
#[must_use]
pub fn batman_begins() -> MovieInfo {
    MovieInfo::new(
        "Batman Begins",
        2005,
        vec!["Christian Bale".into(), "Michael Cane".into()],
        NaiveDate::from_ymd_opt(2005, 6, 15),
    )
}

/// An unsaved "The Dark Knight" record.
#[must_use]
pub fn dark_knight() -> MovieInfo {
    MovieInfo::new(
        "The Dark Knight",
        2008,
        vec!["Christian Bale".into(), "Heath Ledger".into()],
        NaiveDate::from_ymd_opt(2008, 7, 18),
    )
}

/// An unsaved review of `movie_info_id`.
#[must_use]
pub fn review_for(movie_info_id: i64, comment: &str, rating: f64) -> Review {
    Review::new(movie_info_id, comment, rating)
}
