//! Command handlers for movie metadata.
//!
//! Each handler validates its input before touching the store. Only record
//! creation feeds the relay.

use movies_core::domain::MovieInfo;
use movies_core::error::DomainError;
use movies_core::relay::ReplayRelay;
use movies_core::repository::MovieInfoRepository;
use movies_core::validation::validate_movie_info;
use tracing::info;

/// Validates and persists a new record, then publishes it to `relay`.
///
/// Any identifier supplied by the caller is discarded; the store assigns one.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the record is invalid, or the
/// store's error if persistence fails. Nothing is published on failure.
pub async fn handle_create(
    mut movie_info: MovieInfo,
    repo: &dyn MovieInfoRepository,
    relay: &ReplayRelay<MovieInfo>,
) -> Result<MovieInfo, DomainError> {
    validate_movie_info(&movie_info)?;
    movie_info.movie_info_id = None;

    let saved = repo.save(movie_info).await?;
    info!(movie_info_id = ?saved.movie_info_id, "movie info created");

    relay.publish(saved.clone());
    Ok(saved)
}

/// Overwrites the name, year, cast, and release date of an existing record.
///
/// Returns `Ok(None)` when no record has `id`.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `changes` is invalid, or the store's
/// error if loading or saving fails.
pub async fn handle_update(
    id: &str,
    changes: MovieInfo,
    repo: &dyn MovieInfoRepository,
) -> Result<Option<MovieInfo>, DomainError> {
    validate_movie_info(&changes)?;

    let Some(mut existing) = repo.find_by_id(id).await? else {
        return Ok(None);
    };
    existing.apply_update(changes);

    let saved = repo.save(existing).await?;
    Ok(Some(saved))
}

/// Removes a record. Unknown identifiers are ignored.
///
/// # Errors
///
/// Returns the store's error if the delete fails.
pub async fn handle_delete(id: &str, repo: &dyn MovieInfoRepository) -> Result<(), DomainError> {
    repo.delete_by_id(id).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use movies_store::InMemoryMovieInfoRepository;
    use movies_test_support::{FailingMovieInfoRepository, batman_begins, dark_knight};
    use tokio_stream::StreamExt;

    use super::*;

    #[tokio::test]
    async fn test_create_assigns_id_and_publishes() {
        // Arrange
        let repo = InMemoryMovieInfoRepository::new();
        let relay = ReplayRelay::new();

        // Act
        let saved = handle_create(batman_begins().with_id("client-chosen"), &repo, &relay)
            .await
            .unwrap();

        // Assert
        let id = saved.movie_info_id.clone().unwrap();
        assert_ne!(id, "client-chosen");
        assert_eq!(relay.len(), 1);
        let mut stream = relay.subscribe();
        let published = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(published, saved);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_record_without_publishing() {
        // Arrange
        let repo = InMemoryMovieInfoRepository::new();
        let relay = ReplayRelay::new();
        let invalid = MovieInfo::new("", 0, vec![], None);

        // Act
        let result = handle_create(invalid, &repo, &relay).await;

        // Assert
        match result {
            Err(DomainError::Validation(msg)) => assert_eq!(
                msg,
                "cast must not be empty,name must not be blank,year must be greater than 0"
            ),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(relay.is_empty());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_does_not_publish_when_store_fails() {
        let relay = ReplayRelay::new();

        let result = handle_create(batman_begins(), &FailingMovieInfoRepository, &relay).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert!(relay.is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_of_existing_record() {
        // Arrange
        let repo = InMemoryMovieInfoRepository::new();
        repo.save(batman_begins().with_id("abc")).await.unwrap();

        // Act
        let updated = handle_update("abc", dark_knight(), &repo).await.unwrap().unwrap();

        // Assert
        assert_eq!(updated.movie_info_id.as_deref(), Some("abc"));
        assert_eq!(updated.name, "The Dark Knight");
        assert_eq!(repo.find_by_id("abc").await.unwrap().unwrap().year, 2008);
    }

    #[tokio::test]
    async fn test_update_unknown_record_returns_none() {
        let repo = InMemoryMovieInfoRepository::new();

        let result = handle_update("missing", batman_begins(), &repo).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = InMemoryMovieInfoRepository::new();
        repo.save(batman_begins().with_id("abc")).await.unwrap();

        handle_delete("abc", &repo).await.unwrap();

        assert!(repo.find_by_id("abc").await.unwrap().is_none());
    }
}
