//! Runs against a real database when `DATABASE_URL` is set; skipped otherwise.

use std::collections::HashSet;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use business::application::order::create::CreateOrderUseCaseImpl;
use business::domain::logger::Logger;
use business::domain::order::assembler::{OrderDraft, OrderLineRequest};
use business::domain::order::errors::OrderError;
use business::domain::order::use_cases::create::{CreateOrderParams, CreateOrderUseCase};
use business::domain::order::value_objects::ShippingAddress;
use business::domain::shared::value_objects::Actor;
use business::domain::transaction::TransactionCoordinator;
use logger::TracingLogger;
use persistence::PgTransactionCoordinator;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};

async fn database() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = create_postgres_pool(&DatabaseConfig::new(url, 16))
        .await
        .expect("database reachable");
    run_migrations(&pool, concat!(env!("CARGO_MANIFEST_DIR"), "/migrations"))
        .await
        .expect("migrations applied");
    Some(pool)
}

async fn seed(pool: &PgPool, stock: i32) -> (Uuid, Uuid) {
    let customer_id = Uuid::new_v4();
    sqlx::query("INSERT INTO customers (id, first_name, last_name, email) VALUES ($1, $2, $3, $4)")
        .bind(customer_id)
        .bind("Ada")
        .bind("Rider")
        .bind(format!("{customer_id}@example.com"))
        .execute(pool)
        .await
        .unwrap();

    let product_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO products (id, model_name, price, cost_price, stock_quantity) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(product_id)
    .bind("Trail 29")
    .bind(BigDecimal::from(100))
    .bind(BigDecimal::from(50))
    .bind(stock)
    .execute(pool)
    .await
    .unwrap();

    (customer_id, product_id)
}

fn one_unit(customer_id: Uuid, product_id: Uuid) -> CreateOrderParams {
    CreateOrderParams {
        draft: OrderDraft {
            customer_id,
            lines: vec![OrderLineRequest {
                product_id,
                quantity: 1,
                notes: None,
            }],
            shipping: ShippingAddress {
                address: "12 Canal Street".to_string(),
                city: "Leeds".to_string(),
                state: "West Yorkshire".to_string(),
                postal_code: "LS1 4AP".to_string(),
            },
            notes: None,
        },
        actor: Actor::system(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn should_never_oversell_across_concurrent_database_transactions() {
    let Some(pool) = database().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    const STOCK: i32 = 5;
    const ORDERS: usize = 16;
    let (customer_id, product_id) = seed(&pool, STOCK).await;

    let transactions: Arc<dyn TransactionCoordinator> =
        Arc::new(PgTransactionCoordinator::new(pool.clone()));
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("tests"));
    let use_case = Arc::new(CreateOrderUseCaseImpl {
        transactions,
        logger,
    });

    let handles: Vec<_> = (0..ORDERS)
        .map(|_| {
            let use_case = use_case.clone();
            tokio::spawn(async move { use_case.execute(one_unit(customer_id, product_id)).await })
        })
        .collect();

    let mut numbers = HashSet::new();
    let mut refused = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(order) => {
                numbers.insert(order.order_number);
            }
            Err(OrderError::InsufficientStock { .. }) => refused += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(numbers.len(), STOCK as usize);
    assert_eq!(refused, ORDERS - STOCK as usize);

    let stock: i32 = sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stock, 0);

    let net: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(quantity), 0)::BIGINT FROM stock_movements WHERE product_id = $1",
    )
    .bind(product_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(net, -i64::from(STOCK));
}
