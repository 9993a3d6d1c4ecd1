//! Request body extractor with the API's error shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] on request bodies.
///
/// A body that is valid JSON but the wrong shape (a fractional rating, a
/// missing field) becomes a 400 `VALIDATION_ERROR`; anything else axum
/// rejects becomes a 400 `BAD_REQUEST`. Both use the `{ error, code }` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
