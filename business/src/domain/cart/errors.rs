use uuid::Uuid;

use crate::domain::errors::{DomainError, ErrorKind, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.invalid_quantity")]
    InvalidQuantity,
    #[error("cart.not_found")]
    CartNotFound,
    #[error("cart.item_not_found")]
    CartItemNotFound,
    #[error("cart.inactive")]
    CartInactive,
    #[error("cart.customer_not_found")]
    CustomerNotFound,
    #[error("cart.product_not_found")]
    ProductNotFound(Uuid),
    #[error("cart.product_inactive")]
    ProductInactive(Uuid),
    #[error("cart.insufficient_stock")]
    InsufficientStock {
        product_id: Uuid,
        requested: i32,
        available: i32,
    },
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl DomainError for CartError {
    fn kind(&self) -> ErrorKind {
        match self {
            CartError::InvalidQuantity | CartError::CartInactive | CartError::ProductInactive(_) => {
                ErrorKind::Validation
            }
            CartError::CartNotFound
            | CartError::CartItemNotFound
            | CartError::CustomerNotFound
            | CartError::ProductNotFound(_) => ErrorKind::NotFound,
            CartError::InsufficientStock { .. } => ErrorKind::Conflict,
            CartError::Repository(_) => ErrorKind::Internal,
        }
    }
}
