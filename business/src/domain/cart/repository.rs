use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::activity::CartActivity;
use super::model::{Cart, CartItem};

#[async_trait]
pub trait CartRepository: Send {
    async fn insert_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError>;
    async fn find_cart(&mut self, id: Uuid) -> Result<Cart, RepositoryError>;
    async fn find_active_cart_for_customer(
        &mut self,
        customer_id: Uuid,
    ) -> Result<Option<Cart>, RepositoryError>;
    async fn update_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError>;
    async fn active_carts(&mut self) -> Result<Vec<Cart>, RepositoryError>;
}

#[async_trait]
pub trait CartItemRepository: Send {
    async fn find_cart_item(&mut self, id: Uuid) -> Result<CartItem, RepositoryError>;
    async fn find_cart_item_by_product(
        &mut self,
        cart_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<CartItem>, RepositoryError>;
    async fn cart_items(&mut self, cart_id: Uuid) -> Result<Vec<CartItem>, RepositoryError>;
    /// Inserts the line or replaces the row with the same id.
    async fn save_cart_item(&mut self, item: &CartItem) -> Result<(), RepositoryError>;
    async fn delete_cart_item(&mut self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CartActivityRepository: Send {
    async fn append_activity(&mut self, activity: &CartActivity) -> Result<(), RepositoryError>;
    /// Entries for a cart, oldest first.
    async fn activity_for_cart(
        &mut self,
        cart_id: Uuid,
    ) -> Result<Vec<CartActivity>, RepositoryError>;
}
