use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::gate::session_gate;
use super::handlers::authenticate::authenticate;
use super::handlers::get_profile::get_profile;
use super::handlers::sign_out::sign_out;
use super::handlers::update_profile::update_profile;
use super::handlers::ApiError;
use super::routes::RouteTable;
use crate::config::SessionConfig;
use crate::domain::account::service::AccountService;
use crate::domain::session::issuer::SessionIssuer;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub session_issuer: Arc<SessionIssuer>,
    pub route_table: Arc<RouteTable>,
    pub cookie_name: String,
    pub secure_cookie: bool,
}

pub fn create_router(
    account_service: Arc<AccountService>,
    session_issuer: Arc<SessionIssuer>,
    route_table: Arc<RouteTable>,
    session: &SessionConfig,
) -> Router {
    let state = AppState {
        account_service,
        session_issuer,
        route_table,
        cookie_name: session.cookie_name.clone(),
        secure_cookie: session.secure_cookie,
    };

    let auth_routes = Router::new()
        .route("/api/auth/login", post(authenticate))
        .route("/api/auth/logout", post(sign_out));

    let profile_routes = Router::new().route("/api/user", get(get_profile).put(update_profile));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // The gate must wrap the fallback too: page paths have no handler here.
    Router::new()
        .merge(auth_routes)
        .merge(profile_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .layer(trace_layer)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
