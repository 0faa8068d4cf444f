//! Authentication middleware for the `/api` routes.
//!
//! Two variants share one flow: extract credentials, resolve a [`Principal`],
//! check the role against the request method, then store the principal in the
//! request extensions for handlers that want it.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, Method, header::WWW_AUTHENTICATE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_auth::{AuthBasic, AuthBearer};

use crate::application::services::Principal;
use crate::{error::AppError, state::AppState};

/// Authenticates requests using JWT Bearer tokens.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if:
/// - Authorization header is missing or not a Bearer token
/// - Token is malformed, expired, wrongly signed or from another issuer
/// - The token role is `USER` and the method is not `GET`/`HEAD`
///
/// # Example
///
/// ```rust,ignore
/// let protected = api::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::bearer_layer));
/// ```
pub async fn bearer_layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let principal = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => st.auth_service.authenticate_bearer(&token),
        Err(_) => Err(AppError::unauthorized(
            "Authorization header is missing or is not a Bearer token",
        )),
    };

    let req = Request::from_parts(parts, body);
    authorize_and_run(principal, req, next, "Bearer").await
}

/// Authenticates requests using HTTP basic credentials.
///
/// The configured account is granted the `ADMIN` role.
pub async fn basic_layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let principal = match AuthBasic::from_request_parts(&mut parts, &()).await {
        Ok(AuthBasic((username, password))) => st
            .auth_service
            .authenticate_basic(&username, password.as_deref()),
        Err(_) => Err(AppError::unauthorized(
            "Authorization header is missing or is not Basic credentials",
        )),
    };

    let req = Request::from_parts(parts, body);
    authorize_and_run(principal, req, next, r#"Basic realm="car-registry""#).await
}

async fn authorize_and_run(
    principal: Result<Principal, AppError>,
    mut req: Request,
    next: Next,
    challenge: &'static str,
) -> Response {
    let result = principal.and_then(|principal| {
        principal.authorize(req.method())?;
        Ok(principal)
    });

    match result {
        Ok(principal) => {
            tracing::debug!(
                subject = %principal.subject,
                role = %principal.role,
                method = %req.method(),
                "Request authenticated"
            );
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(e) => {
            let mut response = e.into_response();
            if req.method() != Method::OPTIONS {
                response
                    .headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
            }
            response
        }
    }
}
