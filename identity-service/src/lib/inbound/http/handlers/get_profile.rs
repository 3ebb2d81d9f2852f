use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileData;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::CurrentSession;

pub async fn get_profile(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .account_service
        .get_profile(&session)
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
