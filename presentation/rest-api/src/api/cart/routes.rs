use std::sync::Arc;

use poem::web::RemoteAddr;
use poem_openapi::{
    OpenApi,
    param::{Header, Path},
    payload::Json,
};

use business::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use business::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart::use_cases::create::{CreateCartParams, CreateCartUseCase};
use business::domain::cart::use_cases::get_active::{GetActiveCartParams, GetActiveCartUseCase};
use business::domain::cart::use_cases::get_activity::{
    GetCartActivityParams, GetCartActivityUseCase,
};
use business::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use business::domain::cart::use_cases::list_active::ListActiveCartsUseCase;
use business::domain::cart::use_cases::remove_item::{
    RemoveCartItemParams, RemoveCartItemUseCase,
};
use business::domain::cart::use_cases::sweep_expired::SweepExpiredCartsUseCase;
use business::domain::cart::use_cases::update_item::{
    UpdateCartItemParams, UpdateCartItemUseCase,
};

use crate::api::actor::resolve_actor;
use crate::api::cart::dto::{
    AddCartItemRequest, CartActivityResponse, CartItemResponse, CartResponse, CartViewResponse,
    ClearCartResponse, CreateCartRequest, SweepReportResponse, UpdateCartItemRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse, parse_id};
use crate::api::tags::ApiTags;

pub struct CartApi {
    create_use_case: Arc<dyn CreateCartUseCase>,
    get_by_id_use_case: Arc<dyn GetCartByIdUseCase>,
    get_active_use_case: Arc<dyn GetActiveCartUseCase>,
    list_active_use_case: Arc<dyn ListActiveCartsUseCase>,
    add_item_use_case: Arc<dyn AddCartItemUseCase>,
    update_item_use_case: Arc<dyn UpdateCartItemUseCase>,
    remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
    clear_use_case: Arc<dyn ClearCartUseCase>,
    activity_use_case: Arc<dyn GetCartActivityUseCase>,
    sweep_use_case: Arc<dyn SweepExpiredCartsUseCase>,
}

impl CartApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_use_case: Arc<dyn CreateCartUseCase>,
        get_by_id_use_case: Arc<dyn GetCartByIdUseCase>,
        get_active_use_case: Arc<dyn GetActiveCartUseCase>,
        list_active_use_case: Arc<dyn ListActiveCartsUseCase>,
        add_item_use_case: Arc<dyn AddCartItemUseCase>,
        update_item_use_case: Arc<dyn UpdateCartItemUseCase>,
        remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
        clear_use_case: Arc<dyn ClearCartUseCase>,
        activity_use_case: Arc<dyn GetCartActivityUseCase>,
        sweep_use_case: Arc<dyn SweepExpiredCartsUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_by_id_use_case,
            get_active_use_case,
            list_active_use_case,
            add_item_use_case,
            update_item_use_case,
            remove_item_use_case,
            clear_use_case,
            activity_use_case,
            sweep_use_case,
        }
    }
}

/// Shopping carts
///
/// Carts hold priced lines until checkout. Idle carts expire and read as not found.
#[OpenApi]
impl CartApi {
    /// Open a cart
    ///
    /// Returns the customer's live cart when there already is one.
    #[oai(path = "/carts", method = "post", tag = "ApiTags::Carts")]
    async fn create_cart(
        &self,
        #[oai(name = "x-actor-id")] actor_id: Header<Option<String>>,
        remote: &RemoteAddr,
        body: Json<CreateCartRequest>,
    ) -> CreateCartResponse {
        let actor = match resolve_actor(actor_id.0.as_deref(), remote) {
            Ok(actor) => actor,
            Err(json) => return CreateCartResponse::BadRequest(json),
        };

        let params = CreateCartParams {
            customer_id: body.0.customer_id,
            session_id: body.0.session_id,
            actor,
        };

        match self.create_use_case.execute(params).await {
            Ok(cart) => CreateCartResponse::Created(Json(cart.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateCartResponse::BadRequest(json),
                    404 => CreateCartResponse::NotFound(json),
                    _ => CreateCartResponse::InternalError(json),
                }
            }
        }
    }

    /// Get a cart with its lines and totals
    #[oai(path = "/carts/:id", method = "get", tag = "ApiTags::Carts")]
    async fn get_cart(&self, id: Path<String>) -> GetCartResponse {
        let cart_id = match parse_id(&id.0, "cart.invalid_id") {
            Ok(id) => id,
            Err(json) => return GetCartResponse::BadRequest(json),
        };

        match self
            .get_by_id_use_case
            .execute(GetCartByIdParams { cart_id })
            .await
        {
            Ok(view) => GetCartResponse::Ok(Json(view.into())),
            Err(err) => GetCartResponse::from_error(err.into_error_response()),
        }
    }

    /// Get the customer's active cart
    #[oai(path = "/customers/:id/cart", method = "get", tag = "ApiTags::Carts")]
    async fn get_active_cart(&self, id: Path<String>) -> GetCartResponse {
        let customer_id = match parse_id(&id.0, "customer.invalid_id") {
            Ok(id) => id,
            Err(json) => return GetCartResponse::BadRequest(json),
        };

        match self
            .get_active_use_case
            .execute(GetActiveCartParams { customer_id })
            .await
        {
            Ok(view) => GetCartResponse::Ok(Json(view.into())),
            Err(err) => GetCartResponse::from_error(err.into_error_response()),
        }
    }

    /// Add a product to a cart
    ///
    /// Adding a product already in the cart increases its quantity.
    #[oai(path = "/carts/:id/items", method = "post", tag = "ApiTags::Carts")]
    async fn add_item(
        &self,
        id: Path<String>,
        #[oai(name = "x-actor-id")] actor_id: Header<Option<String>>,
        remote: &RemoteAddr,
        body: Json<AddCartItemRequest>,
    ) -> CartItemMutationResponse {
        let cart_id = match parse_id(&id.0, "cart.invalid_id") {
            Ok(id) => id,
            Err(json) => return CartItemMutationResponse::BadRequest(json),
        };
        let actor = match resolve_actor(actor_id.0.as_deref(), remote) {
            Ok(actor) => actor,
            Err(json) => return CartItemMutationResponse::BadRequest(json),
        };

        let params = AddCartItemParams {
            cart_id,
            product_id: body.0.product_id,
            quantity: body.0.quantity,
            actor,
        };

        match self.add_item_use_case.execute(params).await {
            Ok(item) => CartItemMutationResponse::Ok(Json(item.into())),
            Err(err) => CartItemMutationResponse::from_error(err.into_error_response()),
        }
    }

    /// Change the quantity of a cart line
    #[oai(path = "/cart-items/:id", method = "put", tag = "ApiTags::Carts")]
    async fn update_item(
        &self,
        id: Path<String>,
        #[oai(name = "x-actor-id")] actor_id: Header<Option<String>>,
        remote: &RemoteAddr,
        body: Json<UpdateCartItemRequest>,
    ) -> CartItemMutationResponse {
        let cart_item_id = match parse_id(&id.0, "cart.invalid_item_id") {
            Ok(id) => id,
            Err(json) => return CartItemMutationResponse::BadRequest(json),
        };
        let actor = match resolve_actor(actor_id.0.as_deref(), remote) {
            Ok(actor) => actor,
            Err(json) => return CartItemMutationResponse::BadRequest(json),
        };

        let params = UpdateCartItemParams {
            cart_item_id,
            quantity: body.0.quantity,
            actor,
        };

        match self.update_item_use_case.execute(params).await {
            Ok(item) => CartItemMutationResponse::Ok(Json(item.into())),
            Err(err) => CartItemMutationResponse::from_error(err.into_error_response()),
        }
    }

    /// Remove a cart line
    #[oai(path = "/cart-items/:id", method = "delete", tag = "ApiTags::Carts")]
    async fn remove_item(
        &self,
        id: Path<String>,
        #[oai(name = "x-actor-id")] actor_id: Header<Option<String>>,
        remote: &RemoteAddr,
    ) -> RemoveCartItemResponse {
        let cart_item_id = match parse_id(&id.0, "cart.invalid_item_id") {
            Ok(id) => id,
            Err(json) => return RemoveCartItemResponse::BadRequest(json),
        };
        let actor = match resolve_actor(actor_id.0.as_deref(), remote) {
            Ok(actor) => actor,
            Err(json) => return RemoveCartItemResponse::BadRequest(json),
        };

        match self
            .remove_item_use_case
            .execute(RemoveCartItemParams {
                cart_item_id,
                actor,
            })
            .await
        {
            Ok(()) => RemoveCartItemResponse::NoContent,
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => RemoveCartItemResponse::BadRequest(json),
                    404 => RemoveCartItemResponse::NotFound(json),
                    _ => RemoveCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Remove every line of a cart
    #[oai(path = "/carts/:id/items", method = "delete", tag = "ApiTags::Carts")]
    async fn clear_cart(
        &self,
        id: Path<String>,
        #[oai(name = "x-actor-id")] actor_id: Header<Option<String>>,
        remote: &RemoteAddr,
    ) -> ClearCartApiResponse {
        let cart_id = match parse_id(&id.0, "cart.invalid_id") {
            Ok(id) => id,
            Err(json) => return ClearCartApiResponse::BadRequest(json),
        };
        let actor = match resolve_actor(actor_id.0.as_deref(), remote) {
            Ok(actor) => actor,
            Err(json) => return ClearCartApiResponse::BadRequest(json),
        };

        match self
            .clear_use_case
            .execute(ClearCartParams { cart_id, actor })
            .await
        {
            Ok(removed) => ClearCartApiResponse::Ok(Json(ClearCartResponse {
                removed: removed as u64,
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ClearCartApiResponse::BadRequest(json),
                    404 => ClearCartApiResponse::NotFound(json),
                    _ => ClearCartApiResponse::InternalError(json),
                }
            }
        }
    }

    /// Audit trail of a cart, oldest first
    #[oai(path = "/carts/:id/activity", method = "get", tag = "ApiTags::Carts")]
    async fn cart_activity(&self, id: Path<String>) -> CartActivityListResponse {
        let cart_id = match parse_id(&id.0, "cart.invalid_id") {
            Ok(id) => id,
            Err(json) => return CartActivityListResponse::BadRequest(json),
        };

        match self
            .activity_use_case
            .execute(GetCartActivityParams { cart_id })
            .await
        {
            Ok(entries) => CartActivityListResponse::Ok(Json(
                entries.into_iter().map(Into::into).collect(),
            )),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => CartActivityListResponse::NotFound(json),
                    _ => CartActivityListResponse::InternalError(json),
                }
            }
        }
    }

    /// List live carts with their totals
    ///
    /// Carts past the idle timeout are left out even before the sweep runs.
    #[oai(path = "/carts", method = "get", tag = "ApiTags::Carts")]
    async fn list_active_carts(&self) -> CartViewListResponse {
        match self.list_active_use_case.execute().await {
            Ok(views) => {
                CartViewListResponse::Ok(Json(views.into_iter().map(Into::into).collect()))
            }
            Err(err) => {
                let (_, json) = err.into_error_response();
                CartViewListResponse::InternalError(json)
            }
        }
    }

    /// Expire idle carts now
    ///
    /// Runs the same sweep the server schedules in the background.
    #[oai(path = "/carts/expired/sweep", method = "post", tag = "ApiTags::Carts")]
    async fn sweep_expired(&self) -> SweepResponse {
        match self.sweep_use_case.execute().await {
            Ok(report) => SweepResponse::Ok(Json(report.into())),
            Err(err) => {
                let (_, json) = err.into_error_response();
                SweepResponse::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateCartResponse {
    #[oai(status = 201)]
    Created(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartViewResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl GetCartResponse {
    fn from_error((status, json): (poem::http::StatusCode, Json<ErrorResponse>)) -> Self {
        match status.as_u16() {
            400 => GetCartResponse::BadRequest(json),
            404 => GetCartResponse::NotFound(json),
            _ => GetCartResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartItemMutationResponse {
    #[oai(status = 200)]
    Ok(Json<CartItemResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl CartItemMutationResponse {
    fn from_error((status, json): (poem::http::StatusCode, Json<ErrorResponse>)) -> Self {
        match status.as_u16() {
            400 => CartItemMutationResponse::BadRequest(json),
            404 => CartItemMutationResponse::NotFound(json),
            409 => CartItemMutationResponse::Conflict(json),
            _ => CartItemMutationResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum RemoveCartItemResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ClearCartApiResponse {
    #[oai(status = 200)]
    Ok(Json<ClearCartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartActivityListResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<CartActivityResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartViewListResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<CartViewResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum SweepResponse {
    #[oai(status = 200)]
    Ok(Json<SweepReportResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
