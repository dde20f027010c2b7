use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::hello::hello;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::signup::signup;
use super::middleware::authenticate;
use super::middleware::require_principal;
use crate::domain::user::ports::CredentialStore;
use crate::domain::user::service::UserService;

pub struct AppState<CS>
where
    CS: CredentialStore,
{
    pub user_service: Arc<UserService<CS>>,
    pub authenticator: Arc<Authenticator>,
}

impl<CS> Clone for AppState<CS>
where
    CS: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<CS>(
    user_service: Arc<UserService<CS>>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    CS: CredentialStore,
{
    let state = AppState {
        user_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/signup", post(signup::<CS>))
        .route("/api/login", post(login::<CS>))
        .route("/api/logout", post(logout))
        .route("/api/hello", get(hello));

    let protected_routes = Router::new()
        .route("/api/me", get(me))
        .route_layer(middleware::from_fn(require_principal));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
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

    // Every route sees the resolved principal, if any.
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<CS>,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
