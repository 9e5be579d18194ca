//! Request body extractors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::error::AppError;

/// Message returned when a body is not valid JSON of the expected shape.
pub const MALFORMED_BODY_MESSAGE: &str = "failed to parse request body";

/// JSON body extractor whose rejection is an [`AppError::BadRequest`].
///
/// Axum's own `Json` rejects shape mismatches with 422 and a plain-text
/// body; every malformed body here is a 400 in the standard error format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                Err(AppError::BadRequest(MALFORMED_BODY_MESSAGE.into()))
            }
        }
    }
}
