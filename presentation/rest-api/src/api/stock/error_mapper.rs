use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::inventory::errors::InventoryError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, domain_error_response};

impl IntoErrorResponse for InventoryError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let name = match &self {
            InventoryError::InvalidQuantity => "ValidationError",
            InventoryError::ProductNotFound(_) => "NotFound",
            InventoryError::InsufficientStock { .. } => "InsufficientStock",
            InventoryError::Repository(_) => "InternalError",
        };
        domain_error_response(&self, name)
    }
}
