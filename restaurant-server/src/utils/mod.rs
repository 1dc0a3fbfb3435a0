//! Utilities

pub mod logger;
pub mod validation;

pub use logger::init_logger_with_file;
pub use validation::{FieldErrors, ValidationScope, validate_patch};
