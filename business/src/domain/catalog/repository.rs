use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::Product;

/// Catalog port. Stock writes are expressed as atomic operations so that the
/// check and the write can never be split by a concurrent transaction.
#[async_trait]
pub trait ProductRepository: Send {
    async fn find_product(&mut self, id: Uuid) -> Result<Product, RepositoryError>;
    /// Reads the product and holds a row lock until the scope ends.
    async fn find_product_for_update(&mut self, id: Uuid) -> Result<Product, RepositoryError>;
    /// Decrements stock only when at least `quantity` units remain.
    /// Returns the new stock, or `None` when stock was insufficient.
    async fn try_decrement_stock(
        &mut self,
        id: Uuid,
        quantity: i32,
    ) -> Result<Option<i32>, RepositoryError>;
    async fn increment_stock(&mut self, id: Uuid, quantity: i32) -> Result<i32, RepositoryError>;
    async fn set_stock(&mut self, id: Uuid, quantity: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CustomerRepository: Send {
    async fn customer_exists(&mut self, id: Uuid) -> Result<bool, RepositoryError>;
}
