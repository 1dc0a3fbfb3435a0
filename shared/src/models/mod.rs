//! Data models
//!
//! Shared between restaurant-server and frontend (via API).
//! Wire format is camelCase JSON; ids are opaque strings.

pub mod restaurant;

// Re-exports
pub use restaurant::*;
