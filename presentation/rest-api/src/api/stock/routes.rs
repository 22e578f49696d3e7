use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Header, Path, Query},
    payload::Json,
};

use business::domain::inventory::model::MovementRequest;
use business::domain::inventory::use_cases::get_current_stock::{
    GetCurrentStockParams, GetCurrentStockUseCase,
};
use business::domain::inventory::use_cases::get_movements::{
    GetMovementsParams, GetMovementsUseCase,
};
use business::domain::inventory::use_cases::get_stock_audit::{
    GetStockAuditParams, GetStockAuditUseCase,
};
use business::domain::inventory::use_cases::record_movement::RecordMovementUseCase;

use crate::api::actor::require_actor_id;
use crate::api::error::{ErrorResponse, IntoErrorResponse, parse_id};
use crate::api::stock::dto::{
    LedgerEntryResponse, MovementTypeDto, RecordMovementRequest, StockAuditResponse, StockLevelResponse,
    StockMovementResponse,
};
use crate::api::tags::ApiTags;

pub struct StockApi {
    record_movement_use_case: Arc<dyn RecordMovementUseCase>,
    current_stock_use_case: Arc<dyn GetCurrentStockUseCase>,
    movements_use_case: Arc<dyn GetMovementsUseCase>,
    audit_use_case: Arc<dyn GetStockAuditUseCase>,
}

impl StockApi {
    pub fn new(
        record_movement_use_case: Arc<dyn RecordMovementUseCase>,
        current_stock_use_case: Arc<dyn GetCurrentStockUseCase>,
        movements_use_case: Arc<dyn GetMovementsUseCase>,
        audit_use_case: Arc<dyn GetStockAuditUseCase>,
    ) -> Self {
        Self {
            record_movement_use_case,
            current_stock_use_case,
            movements_use_case,
            audit_use_case,
        }
    }
}

/// Stock ledger
#[OpenApi]
impl StockApi {
    /// Record a stock movement
    ///
    /// Requires the `x-actor-id` header: every ledger row names who made it.
    #[oai(path = "/stock/movements", method = "post", tag = "ApiTags::Stock")]
    async fn record_movement(
        &self,
        #[oai(name = "x-actor-id")] actor_id: Header<Option<String>>,
        body: Json<RecordMovementRequest>,
    ) -> RecordMovementResponse {
        let actor_id = match require_actor_id(actor_id.0.as_deref()) {
            Ok(id) => id,
            Err(json) => return RecordMovementResponse::BadRequest(json),
        };

        let request = MovementRequest {
            product_id: body.0.product_id,
            quantity: body.0.quantity,
            movement_type: body.0.movement_type.into(),
            actor_id,
            reference_id: body.0.reference_id,
            notes: body.0.notes,
        };

        match self.record_movement_use_case.execute(request).await {
            Ok(entry) => RecordMovementResponse::Created(Json(entry.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => RecordMovementResponse::BadRequest(json),
                    404 => RecordMovementResponse::NotFound(json),
                    409 => RecordMovementResponse::Conflict(json),
                    _ => RecordMovementResponse::InternalError(json),
                }
            }
        }
    }

    /// Current stock level of a product
    #[oai(path = "/stock/:product_id", method = "get", tag = "ApiTags::Stock")]
    async fn current_stock(&self, product_id: Path<String>) -> StockLevelApiResponse {
        let product_id = match parse_id(&product_id.0, "product.invalid_id") {
            Ok(id) => id,
            Err(json) => return StockLevelApiResponse::BadRequest(json),
        };

        match self
            .current_stock_use_case
            .execute(GetCurrentStockParams { product_id })
            .await
        {
            Ok(stock_quantity) => StockLevelApiResponse::Ok(Json(StockLevelResponse {
                product_id,
                stock_quantity,
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => StockLevelApiResponse::NotFound(json),
                    _ => StockLevelApiResponse::InternalError(json),
                }
            }
        }
    }

    /// Ledger rows of a product, newest first
    #[oai(
        path = "/stock/:product_id/movements",
        method = "get",
        tag = "ApiTags::Stock"
    )]
    async fn movements(
        &self,
        product_id: Path<String>,
        movement_type: Query<Option<MovementTypeDto>>,
    ) -> MovementsResponse {
        let product_id = match parse_id(&product_id.0, "product.invalid_id") {
            Ok(id) => id,
            Err(json) => return MovementsResponse::BadRequest(json),
        };

        match self
            .movements_use_case
            .execute(GetMovementsParams {
                product_id,
                movement_type: movement_type.0.map(Into::into),
            })
            .await
        {
            Ok(movements) => {
                MovementsResponse::Ok(Json(movements.into_iter().map(Into::into).collect()))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => MovementsResponse::NotFound(json),
                    _ => MovementsResponse::InternalError(json),
                }
            }
        }
    }

    /// Cached stock next to the ledger sum
    #[oai(path = "/stock/:product_id/audit", method = "get", tag = "ApiTags::Stock")]
    async fn audit(&self, product_id: Path<String>) -> StockAuditApiResponse {
        let product_id = match parse_id(&product_id.0, "product.invalid_id") {
            Ok(id) => id,
            Err(json) => return StockAuditApiResponse::BadRequest(json),
        };

        match self
            .audit_use_case
            .execute(GetStockAuditParams { product_id })
            .await
        {
            Ok(audit) => StockAuditApiResponse::Ok(Json(audit.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => StockAuditApiResponse::NotFound(json),
                    _ => StockAuditApiResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum RecordMovementResponse {
    #[oai(status = 201)]
    Created(Json<LedgerEntryResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum StockLevelApiResponse {
    #[oai(status = 200)]
    Ok(Json<StockLevelResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum MovementsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<StockMovementResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum StockAuditApiResponse {
    #[oai(status = 200)]
    Ok(Json<StockAuditResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
