use thiserror::Error;

use crate::account::models::AccountId;
use crate::account::models::Role;

/// Caller-facing view of a validated session: who, and in which role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub id: AccountId,
    pub role: Role,
}

/// Error type for session token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No session token presented")]
    Missing,

    #[error("Session token is expired")]
    Expired,

    #[error("Session token is invalid: {0}")]
    Invalid(String),

    #[error("Failed to sign session token: {0}")]
    SigningFailed(String),
}

impl From<auth::JwtError> for SessionError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::TokenExpired => SessionError::Expired,
            auth::JwtError::EncodingFailed(msg) => SessionError::SigningFailed(msg),
            other => SessionError::Invalid(other.to_string()),
        }
    }
}
