use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;

use super::routes::RouteClass;
use super::session::read_session;
use crate::inbound::http::router::AppState;

/// Middleware that classifies the request path and enforces session presence.
///
/// Assets pass untouched. A caller who already holds a valid session and asks
/// for the login page is sent to the landing page. Protected paths without a
/// valid session redirect to login with the requested path as `callbackUrl`;
/// with one, the `SessionView` is attached to the request extensions.
/// Public and unclassified paths pass through.
pub async fn session_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let table = &state.route_table;
    let class = table.classify(&path);

    if class == RouteClass::Asset {
        return next.run(req).await;
    }

    if table.is_login_path(&path) {
        if read_session(&state, req.headers()).is_ok() {
            tracing::debug!(path = %path, "Signed-in caller sent to landing page");
            return Redirect::temporary(table.landing_path()).into_response();
        }
        return next.run(req).await;
    }

    if class != RouteClass::Protected {
        return next.run(req).await;
    }

    match read_session(&state, req.headers()) {
        Ok(view) => {
            req.extensions_mut().insert(view);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(path = %path, reason = %e, "Protected path without session");
            let location = format!(
                "{}?callbackUrl={}",
                table.login_path(),
                urlencoding::encode(&path)
            );
            Redirect::temporary(&location).into_response()
        }
    }
}
