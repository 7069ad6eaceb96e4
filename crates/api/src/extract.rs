//! Request extractors whose rejections are [`AppError`]s.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections rendered as the usual JSON error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
