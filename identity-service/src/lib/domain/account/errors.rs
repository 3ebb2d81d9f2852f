use thiserror::Error;

use crate::account::models::Role;

/// Error for role tag parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name is required")]
    Blank,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid name: {0}")]
    InvalidDisplayName(#[from] DisplayNameError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    /// Unknown identifier and wrong password collapse into this one variant
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("{role} store unavailable: {reason}")]
    StoreUnavailable { role: Role, reason: String },

    #[error("Update failed: {0}")]
    ProfileWriteFailed(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

