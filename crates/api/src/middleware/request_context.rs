use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request context threaded explicitly into handlers.
///
/// The id is assigned by `SetRequestIdLayer` before any handler runs and
/// echoed back by `PropagateRequestIdLayer`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        Ok(Self { request_id })
    }
}
