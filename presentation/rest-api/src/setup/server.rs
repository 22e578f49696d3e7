use poem::{
    Endpoint, EndpointExt, Route, Server as PoemServer, listener::TcpListener, middleware::Tracing,
};
use poem_openapi::OpenApiService;

use crate::{
    config::app_config::AppConfig,
    setup::{dependency_injection::DependencyContainer, sweep_schedule},
};

pub struct Server;

impl Server {
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();

        let sweeper = match config.cart.sweep_interval() {
            Some(period) => Some(sweep_schedule::spawn(
                container.sweep_use_case.clone(),
                period,
            )),
            None => {
                tracing::info!("Cart expiry sweep disabled");
                None
            }
        };

        let app = routes(container, &format!("http://{}", addr))
            .with(config.cors)
            .with(Tracing);

        tracing::info!(%addr, "Server listening; Swagger UI at /docs");
        let result = PoemServer::new(TcpListener::bind(&addr)).run(app).await;

        if let Some(handle) = sweeper {
            handle.abort();
        }
        result?;
        Ok(())
    }
}

/// The API, its Swagger UI and the OpenAPI document.
pub fn routes(
    container: DependencyContainer,
    server_url: &str,
) -> impl Endpoint<Output = poem::Response> + use<> {
    let api_service = OpenApiService::new(
        (
            container.health_api,
            container.cart_api,
            container.order_api,
            container.stock_api,
        ),
        "Fulfillment API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);
    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();

    Route::new()
        .nest("/", api_service)
        .nest("/docs", ui)
        .nest("/openapi.json", spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use bigdecimal::BigDecimal;
    use business::domain::cart::lifecycle::CartExpiryPolicy;
    use business::domain::catalog::model::Product;
    use chrono::Utc;
    use persistence::InMemoryStore;
    use poem::endpoint::BoxEndpoint;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use serde_json::json;
    use uuid::Uuid;

    struct Fixture {
        client: TestClient<BoxEndpoint<'static>>,
        customer_id: Uuid,
        product_id: Uuid,
    }

    async fn fixture(stock: i32) -> Fixture {
        let store = InMemoryStore::new();
        let customer_id = Uuid::new_v4();
        store.add_customer(customer_id).await;
        let product = Product::from_repository(
            Uuid::new_v4(),
            "Trail 29".to_string(),
            BigDecimal::from(100),
            BigDecimal::from(60),
            stock,
            true,
            Utc::now(),
        );
        let product_id = product.id;
        store.add_product(product).await;

        let container =
            DependencyContainer::with_coordinator(Arc::new(store), CartExpiryPolicy::default());
        let app = routes(container, "http://localhost").boxed();

        Fixture {
            client: TestClient::new(app),
            customer_id,
            product_id,
        }
    }

    #[tokio::test]
    async fn should_report_health() {
        let f = fixture(1).await;

        let resp = f.client.get("/health").send().await;

        resp.assert_status_is_ok();
    }

    #[tokio::test]
    async fn should_check_out_cart_over_http() {
        let f = fixture(5).await;

        let resp = f
            .client
            .post("/carts")
            .body_json(&json!({ "customer_id": f.customer_id }))
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);
        let cart_id = resp
            .json()
            .await
            .value()
            .object()
            .get("id")
            .string()
            .to_string();

        let resp = f
            .client
            .post(format!("/carts/{cart_id}/items"))
            .body_json(&json!({ "product_id": f.product_id, "quantity": 2 }))
            .send()
            .await;
        resp.assert_status_is_ok();

        let resp = f
            .client
            .post("/orders/from-cart")
            .body_json(&json!({
                "cart_id": cart_id,
                "shipping": {
                    "address": "12 Canal Street",
                    "city": "Leeds",
                    "state": "West Yorkshire",
                    "postal_code": "LS1 4AP"
                }
            }))
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);
        let order = resp.json().await;
        order.value().object().get("total_amount").assert_string("200");
        order.value().object().get("status").assert_string("pending");

        let resp = f
            .client
            .get(format!("/stock/{}", f.product_id))
            .send()
            .await;
        resp.assert_status_is_ok();
        resp.json()
            .await
            .value()
            .object()
            .get("stock_quantity")
            .assert_i64(3);
    }

    #[tokio::test]
    async fn should_list_live_carts_and_orders_by_status() {
        let f = fixture(5).await;

        let resp = f
            .client
            .post("/carts")
            .body_json(&json!({ "customer_id": f.customer_id }))
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);

        let resp = f.client.get("/carts").send().await;
        resp.assert_status_is_ok();
        resp.json().await.value().array().assert_len(1);

        let resp = f
            .client
            .post("/orders")
            .body_json(&json!({
                "customer_id": f.customer_id,
                "items": [{ "product_id": f.product_id, "quantity": 1 }],
                "shipping": {
                    "address": "1 High St",
                    "city": "York",
                    "state": "North Yorkshire",
                    "postal_code": "YO1 7HH"
                }
            }))
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);

        let resp = f
            .client
            .get("/orders")
            .query("status", &"pending")
            .send()
            .await;
        resp.assert_status_is_ok();
        let page = resp.json().await;
        page.value().object().get("total").assert_i64(1);
        page.value().object().get("orders").array().assert_len(1);

        let resp = f
            .client
            .get("/orders")
            .query("status", &"shipped")
            .send()
            .await;
        resp.assert_status_is_ok();
        resp.json().await.value().object().get("total").assert_i64(0);

        f.client
            .get("/orders")
            .query("page", &0)
            .send()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_answer_conflict_when_stock_is_short() {
        let f = fixture(1).await;

        let resp = f
            .client
            .post("/orders")
            .body_json(&json!({
                "customer_id": f.customer_id,
                "items": [{ "product_id": f.product_id, "quantity": 3 }],
                "shipping": {
                    "address": "1 High St",
                    "city": "York",
                    "state": "North Yorkshire",
                    "postal_code": "YO1 7HH"
                }
            }))
            .send()
            .await;

        resp.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn should_reject_malformed_ids_and_actor() {
        let f = fixture(1).await;

        f.client
            .get("/carts/not-a-uuid")
            .send()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        f.client
            .post("/stock/movements")
            .body_json(&json!({
                "product_id": f.product_id,
                "movement_type": "IN",
                "quantity": 4
            }))
            .send()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_record_movement_with_actor_header() {
        let f = fixture(7).await;

        let resp = f
            .client
            .post("/stock/movements")
            .header("x-actor-id", Uuid::new_v4().to_string())
            .body_json(&json!({
                "product_id": f.product_id,
                "movement_type": "ADJUSTMENT",
                "quantity": 10
            }))
            .send()
            .await;

        resp.assert_status(StatusCode::CREATED);
        let body = resp.json().await;
        body.value().object().get("stock_after").assert_i64(10);
        body.value()
            .object()
            .get("movement")
            .object()
            .get("quantity")
            .assert_i64(3);
    }
}
