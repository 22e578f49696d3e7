use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::order::errors::OrderError;

use crate::api::error::{ErrorResponse, IntoErrorResponse, domain_error_response};

impl IntoErrorResponse for OrderError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let name = match &self {
            OrderError::EmptyOrder
            | OrderError::InvalidQuantity
            | OrderError::MissingShippingField(_)
            | OrderError::ProductInactive(_)
            | OrderError::CartEmpty
            | OrderError::InvalidPage => "ValidationError",
            OrderError::CartInactive => "CartInactive",
            OrderError::CustomerNotFound
            | OrderError::ProductNotFound(_)
            | OrderError::CartNotFound
            | OrderError::OrderNotFound => "NotFound",
            OrderError::InsufficientStock { .. } => "InsufficientStock",
            OrderError::InvalidStatusTransition { .. } => "InvalidStatusTransition",
            OrderError::OrderNumberExhausted | OrderError::Repository(_) => "InternalError",
        };
        domain_error_response(&self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::order::model::OrderStatus;

    #[test]
    fn should_answer_conflict_on_backward_transition() {
        let err = OrderError::InvalidStatusTransition {
            from: OrderStatus::Shipped,
            to: OrderStatus::Pending,
        };

        let (status, json) = err.into_error_response();

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json.0.message, "order.invalid_status_transition");
    }

    #[test]
    fn should_answer_bad_request_for_converted_cart() {
        let (status, json) = OrderError::CartInactive.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.name, "CartInactive");
    }

    #[test]
    fn should_answer_bad_request_for_invalid_page() {
        let (status, json) = OrderError::InvalidPage.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.message, "order.invalid_page");
    }

    #[test]
    fn should_hide_number_exhaustion_details() {
        let (status, json) = OrderError::OrderNumberExhausted.into_error_response();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.0.message, "internal.error");
    }
}
