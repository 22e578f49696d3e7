use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::Order;
use super::query::OrderQuery;

/// Orders are stored together with their items.
#[async_trait]
pub trait OrderRepository: Send {
    async fn insert_order(&mut self, order: &Order) -> Result<(), RepositoryError>;
    async fn find_order(&mut self, id: Uuid) -> Result<Order, RepositoryError>;
    async fn find_order_by_number(&mut self, order_number: &str)
    -> Result<Order, RepositoryError>;
    async fn order_number_exists(&mut self, order_number: &str) -> Result<bool, RepositoryError>;
    /// Newest first.
    async fn orders_for_customer(&mut self, customer_id: Uuid)
    -> Result<Vec<Order>, RepositoryError>;
    /// One page of orders, newest first, and the number matching the filter.
    async fn find_orders(&mut self, query: &OrderQuery)
    -> Result<(Vec<Order>, u64), RepositoryError>;
    /// Persists header fields (status, dates, processed_by). Items are immutable.
    async fn update_order(&mut self, order: &Order) -> Result<(), RepositoryError>;
}
