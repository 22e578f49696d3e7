use async_trait::async_trait;
use uuid::Uuid;

use business::domain::catalog::model::Product;
use business::domain::catalog::repository::{CustomerRepository, ProductRepository};
use business::domain::errors::RepositoryError;

use super::entity::ProductEntity;
use crate::error::db_error;
use crate::unit_of_work::PgUnitOfWork;

const PRODUCT_COLUMNS: &str =
    "id, model_name, price, cost_price, stock_quantity, is_active, updated_at";

#[async_trait]
impl ProductRepository for PgUnitOfWork {
    async fn find_product(&mut self, id: Uuid) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.conn()?)
        .await
        .map_err(db_error("find_product"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn find_product_for_update(&mut self, id: Uuid) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(self.conn()?)
        .await
        .map_err(db_error("find_product_for_update"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn try_decrement_stock(
        &mut self,
        id: Uuid,
        quantity: i32,
    ) -> Result<Option<i32>, RepositoryError> {
        sqlx::query_scalar::<_, i32>(
            r#"UPDATE products
            SET stock_quantity = stock_quantity - $2, updated_at = NOW()
            WHERE id = $1 AND stock_quantity >= $2
            RETURNING stock_quantity"#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(self.conn()?)
        .await
        .map_err(db_error("try_decrement_stock"))
    }

    async fn increment_stock(&mut self, id: Uuid, quantity: i32) -> Result<i32, RepositoryError> {
        sqlx::query_scalar::<_, i32>(
            r#"UPDATE products
            SET stock_quantity = stock_quantity + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING stock_quantity"#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(self.conn()?)
        .await
        .map_err(db_error("increment_stock"))?
        .ok_or(RepositoryError::NotFound)
    }

    async fn set_stock(&mut self, id: Uuid, quantity: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET stock_quantity = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(quantity)
        .execute(self.conn()?)
        .await
        .map_err(db_error("set_stock"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for PgUnitOfWork {
    async fn customer_exists(&mut self, id: Uuid) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
            .bind(id)
            .fetch_one(self.conn()?)
            .await
            .map_err(db_error("customer_exists"))
    }
}
