//! Movie metadata record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata for a single movie, owned by the movies-info service.
///
/// `movie_info_id` is unset until the record is first persisted; the store
/// assigns it and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInfo {
    /// Store-assigned identifier.
    #[serde(default)]
    pub movie_info_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Release year.
    #[serde(default)]
    pub year: i32,
    /// Cast members, in billing order.
    #[serde(default)]
    pub cast: Vec<String>,
    /// Theatrical release date.
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

impl MovieInfo {
    /// Creates an unsaved record with no identifier.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        year: i32,
        cast: Vec<String>,
        release_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            movie_info_id: None,
            name: name.into(),
            year,
            cast,
            release_date,
        }
    }

    /// Returns a copy carrying `id`.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.movie_info_id = Some(id.into());
        self
    }

    /// Overwrites every mutable field with the values from `changes`,
    /// keeping this record's identifier.
    pub fn apply_update(&mut self, changes: MovieInfo) {
        self.name = changes.name;
        self.year = changes.year;
        self.cast = changes.cast;
        self.release_date = changes.release_date;
    }
}
