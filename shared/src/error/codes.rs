//! Unified error codes for the restaurant platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Restaurant errors
//! - 4xxx: Media upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// Principal is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,
    /// Restaurant owner role required
    OwnerRequired = 2004,

    // ==================== 3xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,
    /// Owner principal has no restaurant bound to it
    RestaurantNotBound = 3002,
    /// Restaurant record disappeared between lookup and write
    RestaurantUnavailable = 3003,

    // ==================== 4xxx: Media Upload ====================
    /// File too large
    FileTooLarge = 4001,
    /// Unsupported file format
    UnsupportedFileFormat = 4002,
    /// Empty file provided
    EmptyFile = 4004,
    /// No filename provided
    NoFilename = 4005,
    /// Upload to the media host failed
    UploadFailed = 4006,
    /// Reconciliation ran before the uploads it depends on
    UploadDependencyMissing = 4007,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::OwnerRequired => "Restaurant owner role is required",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::RestaurantNotBound => "No restaurant is bound to this account",
            ErrorCode::RestaurantUnavailable => "Restaurant record is no longer available",

            // Media
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::NoFilename => "No filename provided",
            ErrorCode::UploadFailed => "Failed to upload media",
            ErrorCode::UploadDependencyMissing => "Media upload has not completed",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::OwnerRequired),

            // Restaurant
            3001 => Ok(ErrorCode::RestaurantNotFound),
            3002 => Ok(ErrorCode::RestaurantNotBound),
            3003 => Ok(ErrorCode::RestaurantUnavailable),

            // Media
            4001 => Ok(ErrorCode::FileTooLarge),
            4002 => Ok(ErrorCode::UnsupportedFileFormat),
            4004 => Ok(ErrorCode::EmptyFile),
            4005 => Ok(ErrorCode::NoFilename),
            4006 => Ok(ErrorCode::UploadFailed),
            4007 => Ok(ErrorCode::UploadDependencyMissing),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::OwnerRequired.code(), 2004);
        assert_eq!(ErrorCode::RestaurantNotFound.code(), 3001);
        assert_eq!(ErrorCode::UploadFailed.code(), 4006);
        assert_eq!(ErrorCode::UploadDependencyMissing.code(), 4007);
        assert_eq!(ErrorCode::RestaurantUnavailable.code(), 3003);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::ValidationFailed.is_success());
        assert!(!ErrorCode::RestaurantNotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::RestaurantNotFound));
        assert_eq!(ErrorCode::try_from(4006), Ok(ErrorCode::UploadFailed));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
        assert_eq!(ErrorCode::try_from(1002), Err(InvalidErrorCode(1002)));
        assert_eq!(ErrorCode::try_from(4003), Err(InvalidErrorCode(4003)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::UploadFailed).unwrap();
        assert_eq!(json, "4006");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("3002").unwrap();
        assert_eq!(code, ErrorCode::RestaurantNotBound);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::ValidationFailed), "2");
        assert_eq!(format!("{}", InvalidErrorCode(42)), "Invalid error code: 42");
    }
}
