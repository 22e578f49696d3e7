use async_trait::async_trait;
use uuid::Uuid;

use business::domain::cart::activity::CartActivity;
use business::domain::cart::model::{Cart, CartItem};
use business::domain::cart::repository::{
    CartActivityRepository, CartItemRepository, CartRepository,
};
use business::domain::errors::RepositoryError;

use super::entity::{CartActivityEntity, CartEntity, CartItemEntity};
use crate::error::db_error;
use crate::unit_of_work::PgUnitOfWork;

const CART_COLUMNS: &str = "id, customer_id, session_id, notes, status, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, cart_id, product_id, quantity, unit_price, added_at, updated_at";

#[async_trait]
impl CartRepository for PgUnitOfWork {
    async fn insert_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO carts (id, customer_id, session_id, notes, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(cart.id)
        .bind(cart.customer_id)
        .bind(&cart.session_id)
        .bind(&cart.notes)
        .bind(cart.status.to_string())
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(self.conn()?)
        .await
        .map_err(db_error("insert_cart"))?;

        Ok(())
    }

    async fn find_cart(&mut self, id: Uuid) -> Result<Cart, RepositoryError> {
        sqlx::query_as::<_, CartEntity>(&format!("SELECT {CART_COLUMNS} FROM carts WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.conn()?)
            .await
            .map_err(db_error("find_cart"))?
            .ok_or(RepositoryError::NotFound)?
            .into_domain()
    }

    async fn find_active_cart_for_customer(
        &mut self,
        customer_id: Uuid,
    ) -> Result<Option<Cart>, RepositoryError> {
        let entity = sqlx::query_as::<_, CartEntity>(&format!(
            "SELECT {CART_COLUMNS} FROM carts WHERE customer_id = $1 AND status = 'active' ORDER BY updated_at DESC LIMIT 1"
        ))
        .bind(customer_id)
        .fetch_optional(self.conn()?)
        .await
        .map_err(db_error("find_active_cart_for_customer"))?;

        entity.map(|e| e.into_domain()).transpose()
    }

    async fn update_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE carts SET session_id = $2, notes = $3, status = $4, updated_at = $5 WHERE id = $1",
        )
        .bind(cart.id)
        .bind(&cart.session_id)
        .bind(&cart.notes)
        .bind(cart.status.to_string())
        .bind(cart.updated_at)
        .execute(self.conn()?)
        .await
        .map_err(db_error("update_cart"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn active_carts(&mut self) -> Result<Vec<Cart>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartEntity>(&format!(
            "SELECT {CART_COLUMNS} FROM carts WHERE status = 'active' ORDER BY updated_at"
        ))
        .fetch_all(self.conn()?)
        .await
        .map_err(db_error("active_carts"))?;

        entities.into_iter().map(|e| e.into_domain()).collect()
    }
}

#[async_trait]
impl CartItemRepository for PgUnitOfWork {
    async fn find_cart_item(&mut self, id: Uuid) -> Result<CartItem, RepositoryError> {
        let entity = sqlx::query_as::<_, CartItemEntity>(&format!(
            "SELECT {ITEM_COLUMNS} FROM cart_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.conn()?)
        .await
        .map_err(db_error("find_cart_item"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn find_cart_item_by_product(
        &mut self,
        cart_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let entity = sqlx::query_as::<_, CartItemEntity>(&format!(
            "SELECT {ITEM_COLUMNS} FROM cart_items WHERE cart_id = $1 AND product_id = $2"
        ))
        .bind(cart_id)
        .bind(product_id)
        .fetch_optional(self.conn()?)
        .await
        .map_err(db_error("find_cart_item_by_product"))?;

        Ok(entity.map(|e| e.into_domain()))
    }

    async fn cart_items(&mut self, cart_id: Uuid) -> Result<Vec<CartItem>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartItemEntity>(&format!(
            "SELECT {ITEM_COLUMNS} FROM cart_items WHERE cart_id = $1 ORDER BY added_at"
        ))
        .bind(cart_id)
        .fetch_all(self.conn()?)
        .await
        .map_err(db_error("cart_items"))?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn save_cart_item(&mut self, item: &CartItem) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO cart_items (id, cart_id, product_id, quantity, unit_price, added_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                quantity = EXCLUDED.quantity,
                unit_price = EXCLUDED.unit_price,
                updated_at = EXCLUDED.updated_at"#,
        )
        .bind(item.id)
        .bind(item.cart_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(&item.unit_price)
        .bind(item.added_at)
        .bind(item.updated_at)
        .execute(self.conn()?)
        .await
        .map_err(db_error("save_cart_item"))?;

        Ok(())
    }

    async fn delete_cart_item(&mut self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(self.conn()?)
            .await
            .map_err(db_error("delete_cart_item"))?;

        Ok(())
    }
}

#[async_trait]
impl CartActivityRepository for PgUnitOfWork {
    async fn append_activity(&mut self, activity: &CartActivity) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO cart_activity_logs
                (id, cart_id, customer_id, product_id, action, quantity, previous_quantity,
                 actor_id, ip_address, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(activity.id)
        .bind(activity.cart_id)
        .bind(activity.customer_id)
        .bind(activity.product_id)
        .bind(activity.action.to_string())
        .bind(activity.quantity)
        .bind(activity.previous_quantity)
        .bind(activity.actor_id)
        .bind(&activity.ip_address)
        .bind(&activity.notes)
        .bind(activity.created_at)
        .execute(self.conn()?)
        .await
        .map_err(db_error("append_activity"))?;

        Ok(())
    }

    async fn activity_for_cart(
        &mut self,
        cart_id: Uuid,
    ) -> Result<Vec<CartActivity>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartActivityEntity>(
            r#"SELECT id, cart_id, customer_id, product_id, action, quantity, previous_quantity,
                actor_id, ip_address, notes, created_at
            FROM cart_activity_logs
            WHERE cart_id = $1
            ORDER BY created_at"#,
        )
        .bind(cart_id)
        .fetch_all(self.conn()?)
        .await
        .map_err(db_error("activity_for_cart"))?;

        entities.into_iter().map(|e| e.into_domain()).collect()
    }
}
