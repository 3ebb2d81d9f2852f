use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::AccountProfile;
use crate::session::models::SessionError;

pub mod authenticate;
pub mod get_profile;
pub mod sign_out;
pub mod update_profile;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::InvalidDisplayName(_) => ApiError::BadRequest(err.to_string()),
            AccountError::Password(_)
            | AccountError::StoreUnavailable { .. }
            | AccountError::ProfileWriteFailed(_)
            | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Account operation failed");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::SigningFailed(_) => {
                tracing::error!(error = %err, "Session signing failed");
                ApiError::InternalServerError(err.to_string())
            }
            SessionError::Missing | SessionError::Expired | SessionError::Invalid(_) => {
                ApiError::Unauthorized("Unauthorized".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Account projection as returned over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
}

impl From<AccountProfile> for ProfileData {
    fn from(profile: AccountProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            role: profile.role.to_string(),
            avatar: profile.avatar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::models::Role;

    #[test]
    fn test_credential_failures_are_unauthorized() {
        assert_eq!(
            ApiError::from(AccountError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
    }

    #[test]
    fn test_store_failures_are_internal() {
        let err = AccountError::StoreUnavailable {
            role: Role::Teacher,
            reason: "pool timed out".to_string(),
        };
        assert!(matches!(
            ApiError::from(err),
            ApiError::InternalServerError(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::ProfileWriteFailed("locked".to_string())),
            ApiError::InternalServerError(msg) if msg == "Update failed: locked"
        ));
    }

    #[test]
    fn test_session_errors_do_not_leak_reason() {
        assert_eq!(
            ApiError::from(SessionError::Invalid("InvalidSignature".to_string())),
            ApiError::Unauthorized("Unauthorized".to_string())
        );
    }
}
