//! `PostgreSQL` implementations of the repository traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use movies_core::domain::{MovieInfo, Review};
use movies_core::error::DomainError;
use movies_core::repository::{MovieInfoRepository, ReviewRepository};

use crate::new_id;

/// Embedded schema for the catalog tables.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a connection pool and ensures the catalog tables exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection or schema bootstrap fails.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    MIGRATOR.run(&pool).await?;
    info!("catalog schema ready");
    Ok(pool)
}

#[allow(clippy::needless_pass_by_value)]
fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

#[derive(Debug, sqlx::FromRow)]
struct MovieInfoRow {
    movie_info_id: String,
    name: String,
    year: i32,
    cast_members: Vec<String>,
    release_date: Option<NaiveDate>,
}

impl From<MovieInfoRow> for MovieInfo {
    fn from(row: MovieInfoRow) -> Self {
        MovieInfo::new(row.name, row.year, row.cast_members, row.release_date)
            .with_id(row.movie_info_id)
    }
}

const MOVIE_INFO_COLUMNS: &str = "movie_info_id, name, year, cast_members, release_date";

/// PostgreSQL-backed movie-info repository.
#[derive(Debug, Clone)]
pub struct PgMovieInfoRepository {
    pool: PgPool,
}

impl PgMovieInfoRepository {
    /// Creates a new `PgMovieInfoRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieInfoRepository for PgMovieInfoRepository {
    async fn save(&self, mut movie_info: MovieInfo) -> Result<MovieInfo, DomainError> {
        let id = movie_info.movie_info_id.get_or_insert_with(new_id).clone();
        sqlx::query(
            r"
            INSERT INTO movie_infos (movie_info_id, name, year, cast_members, release_date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (movie_info_id) DO UPDATE
            SET name = EXCLUDED.name,
                year = EXCLUDED.year,
                cast_members = EXCLUDED.cast_members,
                release_date = EXCLUDED.release_date
            ",
        )
        .bind(&id)
        .bind(&movie_info.name)
        .bind(movie_info.year)
        .bind(&movie_info.cast)
        .bind(movie_info.release_date)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(movie_info)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MovieInfo>, DomainError> {
        let row: Option<MovieInfoRow> = sqlx::query_as(&format!(
            "SELECT {MOVIE_INFO_COLUMNS} FROM movie_infos WHERE movie_info_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(row.map(MovieInfo::from))
    }

    async fn find_all(&self) -> Result<Vec<MovieInfo>, DomainError> {
        let rows: Vec<MovieInfoRow> = sqlx::query_as(&format!(
            "SELECT {MOVIE_INFO_COLUMNS} FROM movie_infos ORDER BY year, name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(rows.into_iter().map(MovieInfo::from).collect())
    }

    async fn find_by_year(&self, year: i32) -> Result<Vec<MovieInfo>, DomainError> {
        let rows: Vec<MovieInfoRow> = sqlx::query_as(&format!(
            "SELECT {MOVIE_INFO_COLUMNS} FROM movie_infos WHERE year = $1 ORDER BY name"
        ))
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(rows.into_iter().map(MovieInfo::from).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MovieInfo>, DomainError> {
        let row: Option<MovieInfoRow> = sqlx::query_as(&format!(
            "SELECT {MOVIE_INFO_COLUMNS} FROM movie_infos WHERE name = $1 LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(row.map(MovieInfo::from))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM movie_infos WHERE movie_info_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    review_id: String,
    movie_info_id: Option<i64>,
    comment: String,
    rating: f64,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            review_id: Some(row.review_id),
            movie_info_id: row.movie_info_id,
            comment: row.comment,
            rating: row.rating,
        }
    }
}

/// PostgreSQL-backed review repository.
#[derive(Debug, Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Creates a new `PgReviewRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn save(&self, mut review: Review) -> Result<Review, DomainError> {
        let id = review.review_id.get_or_insert_with(new_id).clone();
        sqlx::query(
            r"
            INSERT INTO reviews (review_id, movie_info_id, comment, rating)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (review_id) DO UPDATE
            SET movie_info_id = EXCLUDED.movie_info_id,
                comment = EXCLUDED.comment,
                rating = EXCLUDED.rating
            ",
        )
        .bind(&id)
        .bind(review.movie_info_id)
        .bind(&review.comment)
        .bind(review.rating)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(review)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, DomainError> {
        let row: Option<ReviewRow> = sqlx::query_as(
            "SELECT review_id, movie_info_id, comment, rating FROM reviews WHERE review_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(row.map(Review::from))
    }

    async fn find_all(&self) -> Result<Vec<Review>, DomainError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            "SELECT review_id, movie_info_id, comment, rating FROM reviews ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn find_by_movie_info_id(
        &self,
        movie_info_id: i64,
    ) -> Result<Vec<Review>, DomainError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT review_id, movie_info_id, comment, rating
            FROM reviews
            WHERE movie_info_id = $1
            ORDER BY created_at
            ",
        )
        .bind(movie_info_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }
}
