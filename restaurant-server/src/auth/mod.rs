//! Authentication
//!
//! - [`JwtService`]: token issue / validation
//! - [`AuthContext`]: principal resolved from a token (owner or admin)
//! - extractors for [`OwnerContext`] / [`AdminContext`]

pub mod context;
pub mod extractor;
pub mod jwt;

pub use context::{AdminContext, AuthContext, OwnerContext};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService, Role};
