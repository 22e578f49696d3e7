use uuid::Uuid;

use crate::domain::catalog::model::Product;
use crate::domain::catalog::repository::ProductRepository;
use crate::domain::errors::RepositoryError;

use super::errors::InventoryError;
use super::model::{LedgerEntry, MovementRequest, MovementType, StockAudit, StockMovement};
use super::repository::StockMovementRepository;

/// Applies one movement to a product's stock and appends it to the ledger.
///
/// The cached quantity and the movement row are written through the same
/// store, so inside a transaction scope they land or vanish together.
/// OUT goes through the store's conditional decrement: there is no separate
/// read-check-write window for a concurrent order to slip through.
pub async fn record_movement<S>(
    store: &mut S,
    request: MovementRequest,
) -> Result<LedgerEntry, InventoryError>
where
    S: ProductRepository + StockMovementRepository + ?Sized,
{
    request.validate()?;
    let product_id = request.product_id;

    let (product, delta, stock_after) = match request.movement_type {
        MovementType::Out => {
            let product = load_product(store, product_id, false).await?;
            match store.try_decrement_stock(product_id, request.quantity).await? {
                Some(after) => (product, -request.quantity, after),
                None => {
                    let available = store.find_product(product_id).await?.stock_quantity;
                    return Err(InventoryError::InsufficientStock {
                        product_id,
                        requested: request.quantity,
                        available,
                    });
                }
            }
        }
        MovementType::In => {
            let product = load_product(store, product_id, false).await?;
            let after = store.increment_stock(product_id, request.quantity).await?;
            (product, request.quantity, after)
        }
        MovementType::Adjustment => {
            let product = load_product(store, product_id, true).await?;
            let delta = request.quantity - product.stock_quantity;
            store.set_stock(product_id, request.quantity).await?;
            (product, delta, request.quantity)
        }
    };

    let notes = match request.notes {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        _ => format!("{} movement for {}", request.movement_type, product.model_name),
    };

    let movement = StockMovement::record(
        product_id,
        delta,
        request.movement_type,
        request.actor_id,
        request.reference_id,
        notes,
    );
    store.insert_movement(&movement).await?;

    Ok(LedgerEntry {
        movement,
        stock_after,
    })
}

/// Cached stock level (fast path).
pub async fn current_stock<S>(store: &mut S, product_id: Uuid) -> Result<i32, InventoryError>
where
    S: ProductRepository + ?Sized,
{
    Ok(load_product(store, product_id, false).await?.stock_quantity)
}

pub async fn audit<S>(store: &mut S, product_id: Uuid) -> Result<StockAudit, InventoryError>
where
    S: ProductRepository + StockMovementRepository + ?Sized,
{
    let cached_quantity = current_stock(store, product_id).await?;
    let net_movement = store.net_movement(product_id).await?;
    Ok(StockAudit {
        product_id,
        cached_quantity,
        net_movement,
    })
}

async fn load_product<S>(
    store: &mut S,
    product_id: Uuid,
    for_update: bool,
) -> Result<Product, InventoryError>
where
    S: ProductRepository + ?Sized,
{
    let result = if for_update {
        store.find_product_for_update(product_id).await
    } else {
        store.find_product(product_id).await
    };
    result.map_err(|e| match e {
        RepositoryError::NotFound => InventoryError::ProductNotFound(product_id),
        other => InventoryError::Repository(other),
    })
}
