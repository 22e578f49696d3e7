use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};
use uuid::Uuid;

use business::domain::errors::{DomainError, ErrorKind};

#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the response for a domain error. Internal failures are logged and
/// reported with a generic message.
pub fn domain_error_response<E: DomainError>(
    err: &E,
    name: &str,
) -> (StatusCode, Json<ErrorResponse>) {
    let kind = err.kind();
    let (name, message) = match kind {
        ErrorKind::Internal => {
            tracing::error!(error = %err, "Request failed with internal error");
            ("InternalError", "internal.error".to_string())
        }
        _ => (name, err.to_string()),
    };

    (
        status_for(kind),
        Json(ErrorResponse {
            name: name.to_string(),
            message,
        }),
    )
}

pub fn bad_request(message: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        name: "ValidationError".to_string(),
        message: message.to_string(),
    })
}

/// Parses a path id, answering 400 with `message` when it is not a UUID.
pub fn parse_id(raw: &str, message: &str) -> Result<Uuid, Json<ErrorResponse>> {
    Uuid::parse_str(raw.trim()).map_err(|_| bad_request(message))
}
