use actix_web::HttpResponse;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Order cannot be cancelled from status {0}")]
    NotCancellable(String),

    #[error("Insufficient stock for variant {0}")]
    InsufficientStock(Uuid),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable discriminator so callers can render failure kinds
    /// distinctly ("already cancelled" vs "could not reach the store").
    fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound => "not_found",
            AppError::NotCancellable(_) => "not_cancellable",
            AppError::InsufficientStock(_) => "insufficient_stock",
            AppError::BadRequest(_) => "invalid_input",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound,
            DomainError::NotCancellable { status } => AppError::NotCancellable(status),
            DomainError::InsufficientStock { variant_id } => AppError::InsufficientStock(variant_id),
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::Store(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = |msg: String| {
            serde_json::json!({
                "error": msg,
                "kind": self.kind(),
            })
        };
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(body(self.to_string())),
            AppError::NotCancellable(_) | AppError::InsufficientStock(_) => {
                HttpResponse::Conflict().json(body(self.to_string()))
            }
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(body(self.to_string())),
            // Store details stay in the logs, not in the response.
            AppError::Internal(_) => {
                HttpResponse::InternalServerError().json(body("Internal server error".to_string()))
            }
        }
    }
}
