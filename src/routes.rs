//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: storage and car queue (public)
//! - `/api/*`            - REST API (guarded according to [`AuthMode`])
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, optional
//! - **Authentication** - Bearer JWT, basic credentials, or none
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::config::AuthMode;
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Router switches taken from [`crate::config::Config`].
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    pub auth_mode: AuthMode,
    /// Requires the server to expose peer addresses through
    /// `into_make_service_with_connect_info::<SocketAddr>()`.
    pub rate_limit_enabled: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            auth_mode: AuthMode::Jwt,
            rate_limit_enabled: false,
        }
    }
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, options: RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, options))
}

/// Routes and middleware without trailing slash normalization.
pub fn build_router(state: AppState, options: RouterOptions) -> Router {
    let api_router = api::routes::protected_routes();
    let api_router = match options.auth_mode {
        AuthMode::Jwt => api_router.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::bearer_layer,
        )),
        AuthMode::Basic => api_router.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::basic_layer,
        )),
        AuthMode::None => api_router,
    };

    let public_router = Router::new().route("/health", get(health_handler));

    let (api_router, public_router) = if options.rate_limit_enabled {
        (
            api_router.layer(rate_limit::secure_layer()),
            public_router.layer(rate_limit::layer()),
        )
    } else {
        (api_router, public_router)
    };

    Router::new()
        .merge(public_router)
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
