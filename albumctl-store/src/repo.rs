//! Album repository
//!
//! Provides a trait for album data access, with:
//! - Postgres implementation borrowing a shared `PgPool`
//! - In-memory implementation for tests (see `memory`)
//! - Deadline enforcement for callers
//!
//! Every operation is one statement; inputs are always bound, never interpolated.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::error::{Result, StoreError};
use crate::models::{Album, NewAlbum};

/// Default per-operation deadline in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Album data access (testable)
#[async_trait]
pub trait AlbumStore: Send + Sync {
    /// Run the diagnostic query and return its literal greeting.
    async fn greeting(&self) -> Result<String>;

    /// Albums whose artist equals `name`, in storage order. Empty when none match.
    async fn albums_by_artist(&self, name: &str) -> Result<Vec<Album>>;

    /// The album with primary key `id`, or [`StoreError::NotFound`].
    async fn album_by_id(&self, id: i64) -> Result<Album>;

    /// Insert `album` and return the id storage assigned to it.
    async fn add_album(&self, album: &NewAlbum) -> Result<i64>;
}

/// Postgres album repository
pub struct AlbumRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AlbumRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl<'a> AlbumStore for AlbumRepo<'a> {
    #[instrument(skip(self))]
    async fn greeting(&self) -> Result<String> {
        sqlx::query_scalar::<_, String>("SELECT 'Hello, world!'::text")
            .fetch_one(self.pool)
            .await
            .map_err(|e| StoreError::query("greeting", "diagnostic", e))
    }

    #[instrument(skip(self))]
    async fn albums_by_artist(&self, name: &str) -> Result<Vec<Album>> {
        // No ORDER BY: callers get whatever order storage returns
        let albums: Vec<Album> = sqlx::query_as(
            r#"
            SELECT id, title, artist, price::float8 AS price
            FROM album
            WHERE artist = $1
            "#,
        )
        .bind(name)
        .fetch_all(self.pool)
        .await
        .map_err(|e| StoreError::query("albums_by_artist", format!("{name:?}"), e))?;

        tracing::debug!(count = albums.len(), "albums found");
        Ok(albums)
    }

    #[instrument(skip(self))]
    async fn album_by_id(&self, id: i64) -> Result<Album> {
        let album: Album = sqlx::query_as(
            r#"
            SELECT id, title, artist, price::float8 AS price
            FROM album
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StoreError::query("album_by_id", id, e))?
        .ok_or(StoreError::NotFound { id })?;

        Ok(album)
    }

    #[instrument(skip(self), fields(title = %album.title, artist = %album.artist))]
    async fn add_album(&self, album: &NewAlbum) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO album (title, artist, price)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&album.title)
        .bind(&album.artist)
        .bind(album.price)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StoreError::query("add_album", format!("{:?}", album.title), e))?;

        tracing::debug!(id, "album inserted");
        Ok(id)
    }
}

/// Await a store operation, failing with [`StoreError::Timeout`] once `deadline` elapses.
pub async fn with_deadline<T, F>(deadline: Duration, operation: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            operation,
            seconds: deadline.as_secs(),
        }),
    }
}
