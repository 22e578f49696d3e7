use std::sync::Arc;

use poem::web::RemoteAddr;
use poem_openapi::{
    OpenApi,
    param::{Header, Path, Query},
    payload::Json,
};

use business::domain::order::use_cases::create::{CreateOrderParams, CreateOrderUseCase};
use business::domain::order::use_cases::create_from_cart::{
    CreateOrderFromCartParams, CreateOrderFromCartUseCase,
};
use business::domain::order::use_cases::get_by_customer::{
    GetCustomerOrdersParams, GetCustomerOrdersUseCase,
};
use business::domain::order::use_cases::get_by_id::{GetOrderByIdParams, GetOrderByIdUseCase};
use business::domain::order::use_cases::get_by_number::{
    GetOrderByNumberParams, GetOrderByNumberUseCase,
};
use business::domain::order::use_cases::list::{ListOrdersParams, ListOrdersUseCase};
use business::domain::order::use_cases::update_status::{
    UpdateOrderStatusParams, UpdateOrderStatusUseCase,
};

use crate::api::actor::resolve_actor;
use crate::api::error::{ErrorResponse, IntoErrorResponse, parse_id};
use crate::api::order::dto::{
    CreateOrderFromCartRequest, CreateOrderRequest, OrderPageResponse, OrderResponse,
    OrderStatusDto, UpdateOrderStatusRequest,
};
use crate::api::tags::ApiTags;

pub struct OrderApi {
    create_use_case: Arc<dyn CreateOrderUseCase>,
    create_from_cart_use_case: Arc<dyn CreateOrderFromCartUseCase>,
    get_by_id_use_case: Arc<dyn GetOrderByIdUseCase>,
    get_by_number_use_case: Arc<dyn GetOrderByNumberUseCase>,
    get_by_customer_use_case: Arc<dyn GetCustomerOrdersUseCase>,
    list_use_case: Arc<dyn ListOrdersUseCase>,
    update_status_use_case: Arc<dyn UpdateOrderStatusUseCase>,
}

impl OrderApi {
    pub fn new(
        create_use_case: Arc<dyn CreateOrderUseCase>,
        create_from_cart_use_case: Arc<dyn CreateOrderFromCartUseCase>,
        get_by_id_use_case: Arc<dyn GetOrderByIdUseCase>,
        get_by_number_use_case: Arc<dyn GetOrderByNumberUseCase>,
        get_by_customer_use_case: Arc<dyn GetCustomerOrdersUseCase>,
        list_use_case: Arc<dyn ListOrdersUseCase>,
        update_status_use_case: Arc<dyn UpdateOrderStatusUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            create_from_cart_use_case,
            get_by_id_use_case,
            get_by_number_use_case,
            get_by_customer_use_case,
            list_use_case,
            update_status_use_case,
        }
    }
}

/// Orders
///
/// Placing an order reserves stock for every line in one transaction.
#[OpenApi]
impl OrderApi {
    /// Place an order from explicit lines
    #[oai(path = "/orders", method = "post", tag = "ApiTags::Orders")]
    async fn create_order(
        &self,
        #[oai(name = "x-actor-id")] actor_id: Header<Option<String>>,
        remote: &RemoteAddr,
        body: Json<CreateOrderRequest>,
    ) -> CreateOrderResponse {
        let actor = match resolve_actor(actor_id.0.as_deref(), remote) {
            Ok(actor) => actor,
            Err(json) => return CreateOrderResponse::BadRequest(json),
        };

        let params = CreateOrderParams {
            draft: body.0.into(),
            actor,
        };

        match self.create_use_case.execute(params).await {
            Ok(order) => CreateOrderResponse::Created(Json(order.into())),
            Err(err) => CreateOrderResponse::from_error(err.into_error_response()),
        }
    }

    /// Check out a cart
    ///
    /// Orders every line of the cart at current prices and closes the cart.
    #[oai(path = "/orders/from-cart", method = "post", tag = "ApiTags::Orders")]
    async fn create_order_from_cart(
        &self,
        #[oai(name = "x-actor-id")] actor_id: Header<Option<String>>,
        remote: &RemoteAddr,
        body: Json<CreateOrderFromCartRequest>,
    ) -> CreateOrderResponse {
        let actor = match resolve_actor(actor_id.0.as_deref(), remote) {
            Ok(actor) => actor,
            Err(json) => return CreateOrderResponse::BadRequest(json),
        };

        let params = CreateOrderFromCartParams {
            cart_id: body.0.cart_id,
            shipping: body.0.shipping.into(),
            notes: body.0.notes,
            actor,
        };

        match self.create_from_cart_use_case.execute(params).await {
            Ok(order) => CreateOrderResponse::Created(Json(order.into())),
            Err(err) => CreateOrderResponse::from_error(err.into_error_response()),
        }
    }

    /// Get an order by id
    #[oai(path = "/orders/:id", method = "get", tag = "ApiTags::Orders")]
    async fn get_order(&self, id: Path<String>) -> GetOrderResponse {
        let order_id = match parse_id(&id.0, "order.invalid_id") {
            Ok(id) => id,
            Err(json) => return GetOrderResponse::BadRequest(json),
        };

        match self
            .get_by_id_use_case
            .execute(GetOrderByIdParams { order_id })
            .await
        {
            Ok(order) => GetOrderResponse::Ok(Json(order.into())),
            Err(err) => GetOrderResponse::from_error(err.into_error_response()),
        }
    }

    /// Get an order by its number (ORD-yyyyMMdd-XXXXXXXX)
    #[oai(path = "/orders/number/:number", method = "get", tag = "ApiTags::Orders")]
    async fn get_order_by_number(&self, number: Path<String>) -> GetOrderResponse {
        match self
            .get_by_number_use_case
            .execute(GetOrderByNumberParams {
                order_number: number.0,
            })
            .await
        {
            Ok(order) => GetOrderResponse::Ok(Json(order.into())),
            Err(err) => GetOrderResponse::from_error(err.into_error_response()),
        }
    }

    /// List a customer's orders, newest first
    #[oai(path = "/customers/:id/orders", method = "get", tag = "ApiTags::Orders")]
    async fn get_customer_orders(&self, id: Path<String>) -> ListOrdersResponse {
        let customer_id = match parse_id(&id.0, "customer.invalid_id") {
            Ok(id) => id,
            Err(json) => return ListOrdersResponse::BadRequest(json),
        };

        match self
            .get_by_customer_use_case
            .execute(GetCustomerOrdersParams { customer_id })
            .await
        {
            Ok(orders) => {
                ListOrdersResponse::Ok(Json(orders.into_iter().map(Into::into).collect()))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => ListOrdersResponse::NotFound(json),
                    _ => ListOrdersResponse::InternalError(json),
                }
            }
        }
    }

    /// List orders, newest first
    ///
    /// Filter by status for fulfilment queues, e.g. `?status=payment_confirmed`.
    #[oai(path = "/orders", method = "get", tag = "ApiTags::Orders")]
    async fn list_orders(
        &self,
        status: Query<Option<OrderStatusDto>>,
        page: Query<Option<u32>>,
        page_size: Query<Option<u32>>,
    ) -> OrderPageApiResponse {
        let params = ListOrdersParams {
            status: status.0.map(Into::into),
            page: page.0,
            page_size: page_size.0,
        };

        match self.list_use_case.execute(params).await {
            Ok(page) => OrderPageApiResponse::Ok(Json(page.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => OrderPageApiResponse::BadRequest(json),
                    _ => OrderPageApiResponse::InternalError(json),
                }
            }
        }
    }

    /// Move an order forward in its lifecycle
    ///
    /// Setting the current status again is accepted and changes nothing.
    #[oai(path = "/orders/:id/status", method = "put", tag = "ApiTags::Orders")]
    async fn update_status(
        &self,
        id: Path<String>,
        #[oai(name = "x-actor-id")] actor_id: Header<Option<String>>,
        remote: &RemoteAddr,
        body: Json<UpdateOrderStatusRequest>,
    ) -> UpdateOrderStatusResponse {
        let order_id = match parse_id(&id.0, "order.invalid_id") {
            Ok(id) => id,
            Err(json) => return UpdateOrderStatusResponse::BadRequest(json),
        };
        let actor = match resolve_actor(actor_id.0.as_deref(), remote) {
            Ok(actor) => actor,
            Err(json) => return UpdateOrderStatusResponse::BadRequest(json),
        };

        let params = UpdateOrderStatusParams {
            order_id,
            status: body.0.status.into(),
            processed_by: body.0.processed_by.or(actor.user_id),
        };

        match self.update_status_use_case.execute(params).await {
            Ok(order) => UpdateOrderStatusResponse::Ok(Json(order.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateOrderStatusResponse::BadRequest(json),
                    404 => UpdateOrderStatusResponse::NotFound(json),
                    409 => UpdateOrderStatusResponse::Conflict(json),
                    _ => UpdateOrderStatusResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateOrderResponse {
    #[oai(status = 201)]
    Created(Json<OrderResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl CreateOrderResponse {
    fn from_error((status, json): (poem::http::StatusCode, Json<ErrorResponse>)) -> Self {
        match status.as_u16() {
            400 => CreateOrderResponse::BadRequest(json),
            404 => CreateOrderResponse::NotFound(json),
            409 => CreateOrderResponse::Conflict(json),
            _ => CreateOrderResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetOrderResponse {
    #[oai(status = 200)]
    Ok(Json<OrderResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl GetOrderResponse {
    fn from_error((status, json): (poem::http::StatusCode, Json<ErrorResponse>)) -> Self {
        match status.as_u16() {
            400 => GetOrderResponse::BadRequest(json),
            404 => GetOrderResponse::NotFound(json),
            _ => GetOrderResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ListOrdersResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<OrderResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum OrderPageApiResponse {
    #[oai(status = 200)]
    Ok(Json<OrderPageResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateOrderStatusResponse {
    #[oai(status = 200)]
    Ok(Json<OrderResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
