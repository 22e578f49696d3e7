#![allow(dead_code)]

use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use business::application::cart::add_item::AddCartItemUseCaseImpl;
use business::application::cart::create::CreateCartUseCaseImpl;
use business::application::cart::get_activity::GetCartActivityUseCaseImpl;
use business::application::cart::get_by_id::GetCartByIdUseCaseImpl;
use business::application::cart::list_active::ListActiveCartsUseCaseImpl;
use business::application::cart::sweep_expired::SweepExpiredCartsUseCaseImpl;
use business::application::cart::update_item::UpdateCartItemUseCaseImpl;
use business::application::inventory::get_stock_audit::GetStockAuditUseCaseImpl;
use business::application::inventory::record_movement::RecordMovementUseCaseImpl;
use business::application::order::create::CreateOrderUseCaseImpl;
use business::application::order::create_from_cart::CreateOrderFromCartUseCaseImpl;
use business::application::order::list::ListOrdersUseCaseImpl;
use business::application::order::update_status::UpdateOrderStatusUseCaseImpl;
use business::domain::cart::lifecycle::CartExpiryPolicy;
use business::domain::catalog::model::Product;
use business::domain::logger::Logger;
use business::domain::order::value_objects::ShippingAddress;
use business::domain::transaction::TransactionCoordinator;
use logger::TracingLogger;
use persistence::InMemoryStore;

/// Use cases wired over one shared in-memory store.
pub struct Harness {
    pub store: InMemoryStore,
    pub create_cart: CreateCartUseCaseImpl,
    pub add_item: AddCartItemUseCaseImpl,
    pub update_item: UpdateCartItemUseCaseImpl,
    pub get_cart: GetCartByIdUseCaseImpl,
    pub list_carts: ListActiveCartsUseCaseImpl,
    pub cart_activity: GetCartActivityUseCaseImpl,
    pub sweep: SweepExpiredCartsUseCaseImpl,
    pub record_movement: RecordMovementUseCaseImpl,
    pub stock_audit: GetStockAuditUseCaseImpl,
    pub create_order: Arc<CreateOrderUseCaseImpl>,
    pub checkout: CreateOrderFromCartUseCaseImpl,
    pub list_orders: ListOrdersUseCaseImpl,
    pub update_status: UpdateOrderStatusUseCaseImpl,
}

impl Harness {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let transactions: Arc<dyn TransactionCoordinator> = Arc::new(store.clone());
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("tests"));
        let expiry = CartExpiryPolicy::default();

        Self {
            create_cart: CreateCartUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            },
            add_item: AddCartItemUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            },
            update_item: UpdateCartItemUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            },
            get_cart: GetCartByIdUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            },
            list_carts: ListActiveCartsUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            },
            cart_activity: GetCartActivityUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            },
            sweep: SweepExpiredCartsUseCaseImpl {
                transactions: transactions.clone(),
                expiry,
                logger: logger.clone(),
            },
            record_movement: RecordMovementUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            },
            stock_audit: GetStockAuditUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            },
            create_order: Arc::new(CreateOrderUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            }),
            list_orders: ListOrdersUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            },
            update_status: UpdateOrderStatusUseCaseImpl {
                transactions: transactions.clone(),
                logger: logger.clone(),
            },
            checkout: CreateOrderFromCartUseCaseImpl {
                transactions,
                expiry,
                logger,
            },
            store,
        }
    }

    pub async fn customer(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.store.add_customer(id).await;
        id
    }

    pub async fn product(&self, name: &str, price: i32, stock: i32) -> Uuid {
        let product = Product::from_repository(
            Uuid::new_v4(),
            name.to_string(),
            BigDecimal::from(price),
            BigDecimal::from(price / 2),
            stock,
            true,
            Utc::now(),
        );
        let id = product.id;
        self.store.add_product(product).await;
        id
    }

    pub async fn stock_of(&self, product_id: Uuid) -> i32 {
        self.store.snapshot().await.products[&product_id].stock_quantity
    }
}

pub fn shipping() -> ShippingAddress {
    ShippingAddress {
        address: "12 Canal Street".to_string(),
        city: "Leeds".to_string(),
        state: "West Yorkshire".to_string(),
        postal_code: "LS1 4AP".to_string(),
    }
}
