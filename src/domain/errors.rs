use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found")]
    NotFound,
    #[error("Order cannot be cancelled from status {status}")]
    NotCancellable { status: String },
    #[error("Insufficient stock for variant {variant_id}")]
    InsufficientStock { variant_id: Uuid },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Store error: {0}")]
    Store(String),
}
