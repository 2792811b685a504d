use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` extractor whose rejections become [`AppError::Validation`], so
/// every malformed body is a plain-text 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
