//! Persistence Module
//!
//! Key-addressed storage for restaurant profiles behind [`ProfileStore`].
//! The PostgreSQL store backs production; the in-memory store is used when
//! no database is configured and throughout the tests.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryProfileStore;
pub use postgres::PgProfileStore;
pub use store::{ProfileStore, StoreError, StoreResult};
