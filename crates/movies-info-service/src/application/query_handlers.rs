//! Query handlers for movie metadata.

use movies_core::domain::MovieInfo;
use movies_core::error::DomainError;
use movies_core::repository::MovieInfoRepository;

/// Optional filters for listing records. `year` takes precedence over
/// `name` when both are given.
#[derive(Debug, Default, Clone)]
pub struct MovieInfoFilter {
    /// Only records released in this year.
    pub year: Option<i32>,
    /// Only the record with exactly this name.
    pub name: Option<String>,
}

/// Lists records, optionally filtered.
///
/// # Errors
///
/// Returns the store's error if the query fails.
pub async fn list_movie_infos(
    filter: &MovieInfoFilter,
    repo: &dyn MovieInfoRepository,
) -> Result<Vec<MovieInfo>, DomainError> {
    if let Some(year) = filter.year {
        return repo.find_by_year(year).await;
    }
    if let Some(name) = &filter.name {
        return Ok(repo.find_by_name(name).await?.into_iter().collect());
    }
    repo.find_all().await
}

/// Loads a single record by identifier.
///
/// # Errors
///
/// Returns the store's error if the query fails.
pub async fn get_movie_info_by_id(
    id: &str,
    repo: &dyn MovieInfoRepository,
) -> Result<Option<MovieInfo>, DomainError> {
    repo.find_by_id(id).await
}
