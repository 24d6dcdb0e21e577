//! Album records

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Album record from database
///
/// `id` is assigned by storage on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

/// Album candidate for insertion (storage assigns the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl NewAlbum {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            price,
        }
    }

    /// Attach a storage-assigned id.
    pub fn with_id(self, id: i64) -> Album {
        Album {
            id,
            title: self.title,
            artist: self.artist,
            price: self.price,
        }
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} \"{}\" by {} (${:.2})",
            self.id, self.title, self.artist, self.price
        )
    }
}

/// Albums used by `albumctl seed` and the in-memory store.
pub fn sample_albums() -> Vec<NewAlbum> {
    vec![
        NewAlbum::new("Blue Train", "John Coltrane", 49.99),
        NewAlbum::new("Giant Steps", "John Coltrane", 59.99),
        NewAlbum::new("Jeru", "Gerry Mulligan", 17.99),
        NewAlbum::new("Sarah Vaughan", "Sarah Vaughan", 34.98),
    ]
}
