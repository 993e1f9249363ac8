pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod repositories;

pub use connection::{connect, connect_with_settings, DbPool};
pub use fixtures::{BakeryCatalogFixture, SeedResult};
pub use repositories::{
    CatalogRepository, InMemoryCatalog, InMemoryHistoryStore, RepositoryError,
    SqlCatalogRepository, SqlHistoryStore, DEFAULT_PROFILE,
};
