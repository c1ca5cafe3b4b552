//! In-memory repositories.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use movies_core::domain::{MovieInfo, Review};
use movies_core::error::DomainError;
use movies_core::repository::{MovieInfoRepository, ReviewRepository};

use crate::new_id;

/// Movie-info store held in process memory. Records are kept in insertion
/// order of their identifiers' first save.
#[derive(Debug, Default)]
pub struct InMemoryMovieInfoRepository {
    records: RwLock<BTreeMap<u64, MovieInfo>>,
}

impl InMemoryMovieInfoRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn position_of<T>(
    records: &BTreeMap<u64, T>,
    id: &str,
    id_of: impl Fn(&T) -> Option<&str>,
) -> Option<u64> {
    records
        .iter()
        .find(|(_, record)| id_of(record) == Some(id))
        .map(|(key, _)| *key)
}

fn next_key<T>(records: &BTreeMap<u64, T>) -> u64 {
    records.keys().next_back().map_or(0, |last| last + 1)
}

#[async_trait]
impl MovieInfoRepository for InMemoryMovieInfoRepository {
    async fn save(&self, mut movie_info: MovieInfo) -> Result<MovieInfo, DomainError> {
        let mut records = self.records.write().await;
        let id = movie_info.movie_info_id.get_or_insert_with(new_id).clone();
        let key = position_of(&*records, &id, |r| r.movie_info_id.as_deref())
            .unwrap_or_else(|| next_key(&*records));
        records.insert(key, movie_info.clone());
        Ok(movie_info)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MovieInfo>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.movie_info_id.as_deref() == Some(id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<MovieInfo>, DomainError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_by_year(&self, year: i32) -> Result<Vec<MovieInfo>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().filter(|r| r.year == year).cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MovieInfo>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.name == name).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(key) = position_of(&*records, id, |r| r.movie_info_id.as_deref()) {
            records.remove(&key);
        }
        Ok(())
    }
}

/// Review store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryReviewRepository {
    records: RwLock<BTreeMap<u64, Review>>,
}

impl InMemoryReviewRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn save(&self, mut review: Review) -> Result<Review, DomainError> {
        let mut records = self.records.write().await;
        let id = review.review_id.get_or_insert_with(new_id).clone();
        let key = position_of(&*records, &id, |r| r.review_id.as_deref())
            .unwrap_or_else(|| next_key(&*records));
        records.insert(key, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.review_id.as_deref() == Some(id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Review>, DomainError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_by_movie_info_id(
        &self,
        movie_info_id: i64,
    ) -> Result<Vec<Review>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.movie_info_id == Some(movie_info_id))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(key) = position_of(&*records, id, |r| r.review_id.as_deref()) {
            records.remove(&key);
        }
        Ok(())
    }
}
