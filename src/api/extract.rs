//! Request extractors that reject with [`AppError`] bodies.
//!
//! Axum's stock `Json` and `Path` rejections answer with plain text; these
//! wrappers keep every client error in the `ErrorMessage` shape.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// Deserializes a JSON body and runs [`Validate::validate`] on it.
///
/// Malformed JSON and failed validation both become [`AppError::BadRequest`].
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(format!("Invalid JSON: {rejection}")))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// A positive entity id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("The id in the path must be an integer"))?;

        if id < 1 {
            return Err(AppError::bad_request(format!(
                "The id in the path must be greater than zero, got {id}"
            )));
        }

        Ok(EntityId(id))
    }
}
