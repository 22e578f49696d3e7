//! Mocks and fixtures shared by the unit tests of this crate.

use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::domain::cart::activity::CartActivity;
use crate::domain::cart::model::{Cart, CartItem};
use crate::domain::cart::repository::{CartActivityRepository, CartItemRepository, CartRepository};
use crate::domain::catalog::model::Product;
use crate::domain::catalog::repository::{CustomerRepository, ProductRepository};
use crate::domain::errors::RepositoryError;
use crate::domain::inventory::model::StockMovement;
use crate::domain::inventory::repository::StockMovementRepository;
use crate::domain::logger::Logger;
use crate::domain::order::model::Order;
use crate::domain::order::query::OrderQuery;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::value_objects::ShippingAddress;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork};

mock! {
    pub Uow {}

    #[async_trait]
    impl ProductRepository for Uow {
        async fn find_product(&mut self, id: Uuid) -> Result<Product, RepositoryError>;
        async fn find_product_for_update(&mut self, id: Uuid) -> Result<Product, RepositoryError>;
        async fn try_decrement_stock(&mut self, id: Uuid, quantity: i32) -> Result<Option<i32>, RepositoryError>;
        async fn increment_stock(&mut self, id: Uuid, quantity: i32) -> Result<i32, RepositoryError>;
        async fn set_stock(&mut self, id: Uuid, quantity: i32) -> Result<(), RepositoryError>;
    }

    #[async_trait]
    impl CustomerRepository for Uow {
        async fn customer_exists(&mut self, id: Uuid) -> Result<bool, RepositoryError>;
    }

    #[async_trait]
    impl StockMovementRepository for Uow {
        async fn insert_movement(&mut self, movement: &StockMovement) -> Result<(), RepositoryError>;
        async fn movements_for_product(&mut self, product_id: Uuid) -> Result<Vec<StockMovement>, RepositoryError>;
        async fn net_movement(&mut self, product_id: Uuid) -> Result<i64, RepositoryError>;
    }

    #[async_trait]
    impl CartRepository for Uow {
        async fn insert_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError>;
        async fn find_cart(&mut self, id: Uuid) -> Result<Cart, RepositoryError>;
        async fn find_active_cart_for_customer(&mut self, customer_id: Uuid) -> Result<Option<Cart>, RepositoryError>;
        async fn update_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError>;
        async fn active_carts(&mut self) -> Result<Vec<Cart>, RepositoryError>;
    }

    #[async_trait]
    impl CartItemRepository for Uow {
        async fn find_cart_item(&mut self, id: Uuid) -> Result<CartItem, RepositoryError>;
        async fn find_cart_item_by_product(&mut self, cart_id: Uuid, product_id: Uuid) -> Result<Option<CartItem>, RepositoryError>;
        async fn cart_items(&mut self, cart_id: Uuid) -> Result<Vec<CartItem>, RepositoryError>;
        async fn save_cart_item(&mut self, item: &CartItem) -> Result<(), RepositoryError>;
        async fn delete_cart_item(&mut self, id: Uuid) -> Result<(), RepositoryError>;
    }

    #[async_trait]
    impl CartActivityRepository for Uow {
        async fn append_activity(&mut self, activity: &CartActivity) -> Result<(), RepositoryError>;
        async fn activity_for_cart(&mut self, cart_id: Uuid) -> Result<Vec<CartActivity>, RepositoryError>;
    }

    #[async_trait]
    impl OrderRepository for Uow {
        async fn insert_order(&mut self, order: &Order) -> Result<(), RepositoryError>;
        async fn find_order(&mut self, id: Uuid) -> Result<Order, RepositoryError>;
        async fn find_order_by_number(&mut self, order_number: &str) -> Result<Order, RepositoryError>;
        async fn order_number_exists(&mut self, order_number: &str) -> Result<bool, RepositoryError>;
        async fn orders_for_customer(&mut self, customer_id: Uuid) -> Result<Vec<Order>, RepositoryError>;
        async fn find_orders(&mut self, query: &OrderQuery) -> Result<(Vec<Order>, u64), RepositoryError>;
        async fn update_order(&mut self, order: &Order) -> Result<(), RepositoryError>;
    }

    #[async_trait]
    impl UnitOfWork for Uow {
        async fn commit(&mut self) -> Result<(), RepositoryError>;
        async fn rollback(&mut self) -> Result<(), RepositoryError>;
    }
}

mock! {
    pub Coordinator {}

    #[async_trait]
    impl TransactionCoordinator for Coordinator {
        async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError>;
    }
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

/// A coordinator handing out the given scopes, one per `begin`, in order.
pub fn coordinator_with(scopes: Vec<MockUow>) -> Arc<dyn TransactionCoordinator> {
    let mut coordinator = MockCoordinator::new();
    let count = scopes.len();
    let mut queue = scopes.into_iter();
    coordinator.expect_begin().times(count).returning(move || {
        let uow = queue.next().expect("no scope left");
        let scope: Box<dyn UnitOfWork> = Box::new(uow);
        Ok(scope)
    });
    Arc::new(coordinator)
}

/// A scope that must end in exactly one commit.
pub fn committing_uow() -> MockUow {
    let mut uow = MockUow::new();
    uow.expect_commit().times(1).returning(|| Ok(()));
    uow.expect_rollback().never();
    uow
}

/// A scope that must end in exactly one rollback.
pub fn rolling_back_uow() -> MockUow {
    let mut uow = MockUow::new();
    uow.expect_commit().never();
    uow.expect_rollback().times(1).returning(|| Ok(()));
    uow
}

pub fn product_with_stock(price: i32, stock: i32) -> Product {
    Product::from_repository(
        Uuid::new_v4(),
        "Trail 29".to_string(),
        BigDecimal::from(price),
        BigDecimal::from(price / 2),
        stock,
        true,
        Utc::now(),
    )
}

pub fn idle_cart(age: Duration) -> Cart {
    let mut cart = Cart::new(Uuid::new_v4(), None);
    cart.updated_at = Utc::now() - age;
    cart
}

pub fn cart_item(cart: &Cart, product_id: Uuid, quantity: i32, unit_price: i32) -> CartItem {
    CartItem::new(cart.id, product_id, quantity, BigDecimal::from(unit_price))
        .expect("valid cart item")
}

pub fn shipping() -> ShippingAddress {
    ShippingAddress {
        address: "14 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        postal_code: "560001".to_string(),
    }
}
