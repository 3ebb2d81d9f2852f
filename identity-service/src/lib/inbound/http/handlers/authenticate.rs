use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileData;
use crate::account::models::Credentials;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::session_cookie;

pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<ProfileData>), ApiError> {
    // An unreadable login form is just another bad credential.
    let Json(body) = payload.map_err(|rejection| {
        tracing::info!(
            status = rejection.status().as_u16(),
            "Login rejected: malformed body"
        );
        ApiError::Unauthorized("Invalid credentials".to_string())
    })?;

    let credentials = Credentials::new(body.identifier, body.password);

    let profile = state.account_service.authenticate(credentials).await?;
    let token = state.session_issuer.issue(&profile)?;

    Ok((
        jar.add(session_cookie(&state, token)),
        ApiSuccess::new(StatusCode::OK, profile.into()),
    ))
}

/// Login form. Missing fields count as empty and fail like any other
/// bad credential.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    #[serde(default, alias = "username")]
    identifier: String,
    #[serde(default)]
    password: String,
}
