use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, domain_error_response};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let name = match &self {
            CartError::InvalidQuantity | CartError::ProductInactive(_) => "ValidationError",
            CartError::CartInactive => "CartInactive",
            CartError::CartNotFound
            | CartError::CartItemNotFound
            | CartError::CustomerNotFound
            | CartError::ProductNotFound(_) => "NotFound",
            CartError::InsufficientStock { .. } => "InsufficientStock",
            CartError::Repository(_) => "InternalError",
        };
        domain_error_response(&self, name)
    }
}
