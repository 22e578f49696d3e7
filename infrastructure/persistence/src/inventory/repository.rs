use async_trait::async_trait;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::inventory::model::StockMovement;
use business::domain::inventory::repository::StockMovementRepository;

use super::entity::StockMovementEntity;
use crate::error::db_error;
use crate::unit_of_work::PgUnitOfWork;

#[async_trait]
impl StockMovementRepository for PgUnitOfWork {
    async fn insert_movement(&mut self, movement: &StockMovement) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO stock_movements
                (id, product_id, quantity, movement_type, actor_id, reference_id, notes, movement_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(movement.id)
        .bind(movement.product_id)
        .bind(movement.quantity)
        .bind(movement.movement_type.to_string())
        .bind(movement.actor_id)
        .bind(movement.reference_id)
        .bind(&movement.notes)
        .bind(movement.movement_date)
        .execute(self.conn()?)
        .await
        .map_err(db_error("insert_movement"))?;

        Ok(())
    }

    async fn movements_for_product(
        &mut self,
        product_id: Uuid,
    ) -> Result<Vec<StockMovement>, RepositoryError> {
        let entities = sqlx::query_as::<_, StockMovementEntity>(
            r#"SELECT id, product_id, quantity, movement_type, actor_id, reference_id, notes, movement_date
            FROM stock_movements
            WHERE product_id = $1
            ORDER BY movement_date DESC"#,
        )
        .bind(product_id)
        .fetch_all(self.conn()?)
        .await
        .map_err(db_error("movements_for_product"))?;

        entities.into_iter().map(|e| e.into_domain()).collect()
    }

    async fn net_movement(&mut self, product_id: Uuid) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(quantity), 0)::BIGINT FROM stock_movements WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(self.conn()?)
        .await
        .map_err(db_error("net_movement"))
    }
}
