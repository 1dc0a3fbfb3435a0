//! Restaurant Server - restaurant profile service
//!
//! Owners register restaurants and keep their profiles up to date;
//! administrators can edit or remove any restaurant. Every write goes
//! through the profile mutation pipeline:
//!
//! ```text
//! resolve target → upload media → reconcile → validate → persist
//! ```
//!
//! # Module layout
//!
//! ```text
//! restaurant-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT, owner / admin extractors
//! ├── api/           # routers, handlers, request parsing
//! ├── services/      # uploader, reconciler, mutation pipeline
//! ├── db/            # profile stores (PostgreSQL, in-memory)
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use auth::{AdminContext, AuthContext, JwtService, OwnerContext};
pub use self::core::{Config, Server, ServerState};
pub use services::{MutationError, ProfileMutationService};
pub use utils::logger::init_logger_with_file;
