//! Shared types for the restaurant platform
//!
//! Common types used across crates including domain models,
//! error types, response structures, and utility functions.

pub mod error;
pub mod models;
pub mod util;
