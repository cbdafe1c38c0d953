//! Crate-local extractors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::error::AppError;

/// JSON body extractor that routes parse failures into [`AppError`].
///
/// `axum::Json` rejects malformed payloads with its own response shape;
/// wrapping it keeps the terminal error mapping in one place, so an
/// unparseable body surfaces as `MalformedBody` like every other
/// pipeline failure.
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::MalformedBody(rejection)),
        }
    }
}
