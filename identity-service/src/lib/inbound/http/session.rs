use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::session::models::SessionError;
use crate::session::models::SessionView;

/// Pull the session token from the session cookie, falling back to a
/// `Authorization: Bearer` header.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Validate whatever token the request carries.
///
/// # Errors
/// * `Missing` - Neither cookie nor bearer header present
/// * `Expired` / `Invalid` - Token present but unusable
pub fn read_session(state: &AppState, headers: &HeaderMap) -> Result<SessionView, SessionError> {
    let token = extract_token(headers, &state.cookie_name).ok_or(SessionError::Missing)?;
    state.session_issuer.read(&token)
}

/// Session cookie carrying a freshly issued token.
///
/// Lives exactly as long as the token it carries.
pub fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let lifetime = time::Duration::hours(state.session_issuer.lifetime_hours());

    Cookie::build((state.cookie_name.clone(), token))
        .path("/")
        .max_age(lifetime)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookie)
        .build()
}

/// Cookie shape used to clear the session cookie.
pub fn removal_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((state.cookie_name.clone(), "")).path("/").build()
}

/// Extractor for handlers that need the signed-in caller.
///
/// Uses the view the gate already attached when the path was protected,
/// and reads the token itself otherwise.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionView);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(view) = parts.extensions.get::<SessionView>() {
            return Ok(CurrentSession(view.clone()));
        }

        read_session(state, &parts.headers)
            .map(CurrentSession)
            .map_err(|e| {
                tracing::debug!(error = %e, "Request without a usable session");
                ApiError::from(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_cookie_preferred_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session_token=from-cookie"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );

        assert_eq!(
            extract_token(&headers, "session_token").as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn test_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );

        assert_eq!(
            extract_token(&headers, "session_token").as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("session_token="));

        assert_eq!(extract_token(&headers, "session_token"), None);
    }
}
