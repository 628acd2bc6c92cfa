use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt::Display;
use thiserror::Error;

/// Errors surfaced by request handlers.
///
/// Only two kinds reach the caller: validation failures (400) and operation
/// failures. A "no matching record" operation failure is reported as 404;
/// anything else is a 500 whose cause is logged and never echoed back.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{context}: {cause}")]
    Operation { context: String, cause: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    /// Builds a `map_err` adapter that keeps `context` as the public message.
    pub fn operation<E: Display>(context: &'static str) -> impl FnOnce(E) -> AppError {
        move |e| AppError::Operation {
            context: context.to_string(),
            cause: e.to_string(),
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg,
            AppError::Operation { context, .. } => context,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Operation { context, cause } => log::error!("❌ {}: {}", context, cause),
            other => log::warn!("⚠️  {}", other),
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "message": self.public_message()
        }))
    }
}
