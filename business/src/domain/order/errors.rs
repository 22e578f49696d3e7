use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::errors::{DomainError, ErrorKind, RepositoryError};
use crate::domain::inventory::errors::InventoryError;

use super::model::OrderStatus;
use super::value_objects::ShippingField;

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order.empty")]
    EmptyOrder,
    #[error("order.invalid_quantity")]
    InvalidQuantity,
    #[error("order.missing_shipping_field")]
    MissingShippingField(ShippingField),
    #[error("order.customer_not_found")]
    CustomerNotFound,
    #[error("order.product_not_found")]
    ProductNotFound(Uuid),
    #[error("order.product_inactive")]
    ProductInactive(Uuid),
    #[error("order.insufficient_stock")]
    InsufficientStock {
        product_id: Uuid,
        requested: i32,
        available: i32,
    },
    #[error("order.cart_not_found")]
    CartNotFound,
    #[error("order.cart_inactive")]
    CartInactive,
    #[error("order.cart_empty")]
    CartEmpty,
    #[error("order.not_found")]
    OrderNotFound,
    #[error("order.invalid_status_transition")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },
    #[error("order.invalid_page")]
    InvalidPage,
    #[error("order.number_exhausted")]
    OrderNumberExhausted,
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl DomainError for OrderError {
    fn kind(&self) -> ErrorKind {
        match self {
            OrderError::EmptyOrder
            | OrderError::InvalidQuantity
            | OrderError::MissingShippingField(_)
            | OrderError::ProductInactive(_)
            | OrderError::CartInactive
            | OrderError::CartEmpty
            | OrderError::InvalidPage => ErrorKind::Validation,
            OrderError::CustomerNotFound
            | OrderError::ProductNotFound(_)
            | OrderError::CartNotFound
            | OrderError::OrderNotFound => ErrorKind::NotFound,
            OrderError::InsufficientStock { .. } | OrderError::InvalidStatusTransition { .. } => {
                ErrorKind::Conflict
            }
            OrderError::OrderNumberExhausted | OrderError::Repository(_) => ErrorKind::Internal,
        }
    }
}

impl From<InventoryError> for OrderError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InvalidQuantity => OrderError::InvalidQuantity,
            InventoryError::ProductNotFound(id) => OrderError::ProductNotFound(id),
            InventoryError::InsufficientStock {
                product_id,
                requested,
                available,
            } => OrderError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            InventoryError::Repository(e) => OrderError::Repository(e),
        }
    }
}

impl From<CartError> for OrderError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::InvalidQuantity => OrderError::InvalidQuantity,
            CartError::CartNotFound | CartError::CartItemNotFound => OrderError::CartNotFound,
            CartError::CartInactive => OrderError::CartInactive,
            CartError::CustomerNotFound => OrderError::CustomerNotFound,
            CartError::ProductNotFound(id) => OrderError::ProductNotFound(id),
            CartError::ProductInactive(id) => OrderError::ProductInactive(id),
            CartError::InsufficientStock {
                product_id,
                requested,
                available,
            } => OrderError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            CartError::Repository(e) => OrderError::Repository(e),
        }
    }
}
