use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use crate::inbound::http::router::AppState;
use crate::inbound::http::session::removal_cookie;

/// Clear the session cookie. Tokens are stateless, so nothing is revoked.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.remove(removal_cookie(&state)), StatusCode::NO_CONTENT)
}
