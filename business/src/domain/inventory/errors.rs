use uuid::Uuid;

use crate::domain::errors::{DomainError, ErrorKind, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory.invalid_quantity")]
    InvalidQuantity,
    #[error("inventory.product_not_found")]
    ProductNotFound(Uuid),
    #[error("inventory.insufficient_stock")]
    InsufficientStock {
        product_id: Uuid,
        requested: i32,
        available: i32,
    },
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl DomainError for InventoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::InvalidQuantity => ErrorKind::Validation,
            InventoryError::ProductNotFound(_) => ErrorKind::NotFound,
            InventoryError::InsufficientStock { .. } => ErrorKind::Conflict,
            InventoryError::Repository(_) => ErrorKind::Internal,
        }
    }
}
