use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::DisplayName;
use crate::account::models::UpdateProfileCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::CurrentSession;

/// HTTP request body for updating the caller's own profile (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: String,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, AccountError> {
        let name = DisplayName::new(self.name)?;

        Ok(UpdateProfileCommand {
            name,
            avatar: self.avatar,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProfileResponseData {
    pub message: String,
}

pub async fn update_profile(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<UpdateProfileResponseData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .account_service
        .update_profile(&session, command)
        .await
        .map_err(ApiError::from)
        .map(|()| {
            ApiSuccess::new(
                StatusCode::OK,
                UpdateProfileResponseData {
                    message: "Updated successfully".to_string(),
                },
            )
        })
}
