use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::order::model::{Order, OrderItem};
use business::domain::order::query::OrderQuery;
use business::domain::order::repository::OrderRepository;

use super::entity::{OrderEntity, OrderItemEntity};
use crate::error::db_error;
use crate::unit_of_work::PgUnitOfWork;

const ORDER_COLUMNS: &str = "id, customer_id, order_number, status, total_amount, \
    shipping_address, shipping_city, shipping_state, shipping_postal_code, notes, processed_by, \
    order_date, processed_date, shipped_date, delivered_date, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price, subtotal, notes";

impl PgUnitOfWork {
    async fn items_for_orders(
        &mut self,
        order_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<OrderItem>>, RepositoryError> {
        let entities = sqlx::query_as::<_, OrderItemEntity>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1)"
        ))
        .bind(order_ids)
        .fetch_all(self.conn()?)
        .await
        .map_err(db_error("items_for_orders"))?;

        let mut grouped: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for entity in entities {
            grouped
                .entry(entity.order_id)
                .or_default()
                .push(entity.into_domain());
        }
        Ok(grouped)
    }

    async fn hydrate(&mut self, entity: OrderEntity) -> Result<Order, RepositoryError> {
        let mut items = self.items_for_orders(&[entity.id]).await?;
        let own = items.remove(&entity.id).unwrap_or_default();
        entity.into_domain(own)
    }
}

#[async_trait]
impl OrderRepository for PgUnitOfWork {
    async fn insert_order(&mut self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO orders
                (id, customer_id, order_number, status, total_amount,
                 shipping_address, shipping_city, shipping_state, shipping_postal_code,
                 notes, processed_by, order_date, processed_date, shipped_date, delivered_date,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)"#,
        )
        .bind(order.id)
        .bind(order.customer_id)
        .bind(&order.order_number)
        .bind(order.status.to_string())
        .bind(&order.total_amount)
        .bind(&order.shipping.address)
        .bind(&order.shipping.city)
        .bind(&order.shipping.state)
        .bind(&order.shipping.postal_code)
        .bind(&order.notes)
        .bind(order.processed_by)
        .bind(order.order_date)
        .bind(order.processed_date)
        .bind(order.shipped_date)
        .bind(order.delivered_date)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(self.conn()?)
        .await
        .map_err(db_error("insert_order"))?;

        for item in &order.items {
            sqlx::query(
                r#"INSERT INTO order_items (id, order_id, product_id, quantity, unit_price, subtotal, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
            )
            .bind(item.id)
            .bind(item.order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(&item.unit_price)
            .bind(&item.subtotal)
            .bind(&item.notes)
            .execute(self.conn()?)
            .await
            .map_err(db_error("insert_order_item"))?;
        }

        Ok(())
    }

    async fn find_order(&mut self, id: Uuid) -> Result<Order, RepositoryError> {
        let entity = sqlx::query_as::<_, OrderEntity>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.conn()?)
        .await
        .map_err(db_error("find_order"))?
        .ok_or(RepositoryError::NotFound)?;

        self.hydrate(entity).await
    }

    async fn find_order_by_number(
        &mut self,
        order_number: &str,
    ) -> Result<Order, RepositoryError> {
        let entity = sqlx::query_as::<_, OrderEntity>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_number = $1"
        ))
        .bind(order_number)
        .fetch_optional(self.conn()?)
        .await
        .map_err(db_error("find_order_by_number"))?
        .ok_or(RepositoryError::NotFound)?;

        self.hydrate(entity).await
    }

    async fn order_number_exists(&mut self, order_number: &str) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM orders WHERE order_number = $1)")
            .bind(order_number)
            .fetch_one(self.conn()?)
            .await
            .map_err(db_error("order_number_exists"))
    }

    async fn orders_for_customer(
        &mut self,
        customer_id: Uuid,
    ) -> Result<Vec<Order>, RepositoryError> {
        let entities = sqlx::query_as::<_, OrderEntity>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY order_date DESC"
        ))
        .bind(customer_id)
        .fetch_all(self.conn()?)
        .await
        .map_err(db_error("orders_for_customer"))?;

        let ids: Vec<Uuid> = entities.iter().map(|e| e.id).collect();
        let mut items = self.items_for_orders(&ids).await?;
        entities
            .into_iter()
            .map(|e| {
                let own = items.remove(&e.id).unwrap_or_default();
                e.into_domain(own)
            })
            .collect()
    }

    async fn find_orders(
        &mut self,
        query: &OrderQuery,
    ) -> Result<(Vec<Order>, u64), RepositoryError> {
        let status = query.status.map(|s| s.to_string());
        let limit = i64::from(query.page_size);
        let offset = i64::try_from(query.offset()).map_err(|_| RepositoryError::DatabaseError)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(&status)
        .fetch_one(self.conn()?)
        .await
        .map_err(db_error("count_orders"))?;

        let entities = sqlx::query_as::<_, OrderEntity>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY order_date DESC, id LIMIT $2 OFFSET $3"
        ))
        .bind(&status)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.conn()?)
        .await
        .map_err(db_error("find_orders"))?;

        let ids: Vec<Uuid> = entities.iter().map(|e| e.id).collect();
        let mut items = self.items_for_orders(&ids).await?;
        let orders = entities
            .into_iter()
            .map(|e| {
                let own = items.remove(&e.id).unwrap_or_default();
                e.into_domain(own)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((orders, u64::try_from(total).unwrap_or_default()))
    }

    async fn update_order(&mut self, order: &Order) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE orders SET
                status = $2,
                processed_by = $3,
                processed_date = $4,
                shipped_date = $5,
                delivered_date = $6,
                updated_at = $7
            WHERE id = $1"#,
        )
        .bind(order.id)
        .bind(order.status.to_string())
        .bind(order.processed_by)
        .bind(order.processed_date)
        .bind(order.shipped_date)
        .bind(order.delivered_date)
        .bind(order.updated_at)
        .execute(self.conn()?)
        .await
        .map_err(db_error("update_order"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
