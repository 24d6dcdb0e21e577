//! albumctl-store: album data access over PostgreSQL
//!
//! A thin facade that maps each intent to one SQL statement:
//! - lookup by artist (zero or more rows)
//! - lookup by primary key (distinct not-found outcome)
//! - insert returning the generated id in the same round trip

pub mod error;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod repo;

pub use error::{Result, StoreError};
pub use memory::MemoryAlbumStore;
pub use models::{sample_albums, Album, NewAlbum};
pub use pool::{create_pool, create_pool_with_options, PoolSettings};
pub use repo::{with_deadline, AlbumRepo, AlbumStore, DEFAULT_TIMEOUT_SECS};
