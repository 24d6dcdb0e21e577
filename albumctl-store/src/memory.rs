//! In-memory album store
//!
//! Behaves like the `album` table: ids are assigned sequentially from 1 and
//! never reused, rows come back in insertion order. Backs unit tests and the
//! CLI `--in-memory` mode.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::models::{sample_albums, Album, NewAlbum};
use crate::repo::AlbumStore;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Album>,
    last_id: i64,
}

/// Album store held in process memory
#[derive(Debug, Default)]
pub struct MemoryAlbumStore {
    table: Mutex<Table>,
}

impl MemoryAlbumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with [`sample_albums`], ids 1 through 4.
    pub fn with_sample_albums() -> Self {
        let store = Self::new();
        {
            let mut table = store.lock();
            for album in sample_albums() {
                insert(&mut table, &album);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        // A poisoned table still holds consistent rows: inserts push whole records
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn insert(table: &mut Table, album: &NewAlbum) -> i64 {
    table.last_id += 1;
    let id = table.last_id;
    table.rows.push(album.clone().with_id(id));
    id
}

#[async_trait]
impl AlbumStore for MemoryAlbumStore {
    async fn greeting(&self) -> Result<String> {
        Ok("Hello, world!".to_string())
    }

    async fn albums_by_artist(&self, name: &str) -> Result<Vec<Album>> {
        Ok(self
            .lock()
            .rows
            .iter()
            .filter(|album| album.artist == name)
            .cloned()
            .collect())
    }

    async fn album_by_id(&self, id: i64) -> Result<Album> {
        self.lock()
            .rows
            .iter()
            .find(|album| album.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn add_album(&self, album: &NewAlbum) -> Result<i64> {
        Ok(insert(&mut self.lock(), album))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coltrane_store() -> MemoryAlbumStore {
        let store = MemoryAlbumStore::new();
        {
            let mut table = store.lock();
            insert(&mut table, &NewAlbum::new("Blue Train", "John Coltrane", 49.99));
            insert(&mut table, &NewAlbum::new("Giant Steps", "John Coltrane", 59.99));
        }
        store
    }

    #[tokio::test]
    async fn greeting_is_fixed() {
        let store = MemoryAlbumStore::new();
        assert_eq!(store.greeting().await.unwrap(), "Hello, world!");
    }

    #[tokio::test]
    async fn unknown_artist_yields_empty_list() {
        let store = coltrane_store();
        let albums = store.albums_by_artist("Nobody").await.unwrap();
        assert!(albums.is_empty());
    }

    #[tokio::test]
    async fn artist_lookup_returns_all_matches() {
        let store = MemoryAlbumStore::with_sample_albums();
        let albums = store.albums_by_artist("John Coltrane").await.unwrap();

        assert_eq!(albums.len(), 2);
        for album in &albums {
            assert_eq!(album.artist, "John Coltrane");
            assert!(album.id > 0);
            assert!(!album.title.is_empty());
            assert!(album.price > 0.0);
        }
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let store = coltrane_store();
        let err = store.album_by_id(3).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 3 }));
    }

    #[tokio::test]
    async fn coltrane_scenario() {
        let store = coltrane_store();

        let mut found = store.albums_by_artist("John Coltrane").await.unwrap();
        found.sort_by_key(|a| a.id);
        assert_eq!(
            found,
            vec![
                NewAlbum::new("Blue Train", "John Coltrane", 49.99).with_id(1),
                NewAlbum::new("Giant Steps", "John Coltrane", 59.99).with_id(2),
            ]
        );

        let giant_steps = store.album_by_id(2).await.unwrap();
        assert_eq!(giant_steps.title, "Giant Steps");

        let candidate = NewAlbum::new("A New Album", "New Artist", 9.99);
        let id = store.add_album(&candidate).await.unwrap();
        assert_eq!(id, 3);
        assert_eq!(store.album_by_id(3).await.unwrap(), candidate.with_id(3));
    }

    #[tokio::test]
    async fn identical_inserts_are_not_deduplicated() {
        let store = MemoryAlbumStore::new();
        let candidate = NewAlbum::new("Jeru", "Gerry Mulligan", 17.99);

        let first = store.add_album(&candidate).await.unwrap();
        let second = store.add_album(&candidate).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
        assert_eq!(store.albums_by_artist("Gerry Mulligan").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn prices_are_stored_exactly() {
        let store = MemoryAlbumStore::new();
        let candidate = NewAlbum::new("Odd", "Price", 9.999);

        let id = store.add_album(&candidate).await.unwrap();
        assert_eq!(store.album_by_id(id).await.unwrap().price, 9.999);
    }

    #[test]
    fn sample_store_is_seeded() {
        let store = MemoryAlbumStore::with_sample_albums();
        assert_eq!(store.len(), 4);
        assert!(!store.is_empty());
        assert!(MemoryAlbumStore::new().is_empty());
    }
}
