use rocket::http::ContentType;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::Request;
use rocket::Response;
use rocket_okapi::JsonSchema;
use serde::Serialize;
use serde_json::json;
use std::io::Cursor;
use thiserror::Error;

/// Failure taxonomy for the whole backend. Business-rule failures are
/// returned to the API layer as values and mapped to client responses;
/// `InvariantViolation` means the seat-accounting contract was broken and
/// is surfaced as a server fault.
#[derive(Error, Debug, Serialize, JsonSchema)]
pub enum AppError {
    #[error("flight {0} not found")]
    FlightNotFound(i64),

    #[error("reservation {0} not found")]
    ReservationNotFound(i64),

    #[error("no account for identity {0}")]
    IdentityNotFound(String),

    #[error("insufficient inventory: requested {requested}, available {available}")]
    InsufficientInventory { requested: i32, available: i32 },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("busy: {0}")]
    Busy(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("authentication error: {0}")]
    AuthError(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

// Format any error escaping a route into an HTTP response.
#[rocket::async_trait]
impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'static> {
        let status = match self {
            AppError::FlightNotFound(_)
            | AppError::ReservationNotFound(_)
            | AppError::IdentityNotFound(_) => Status::NotFound,
            AppError::InsufficientInventory { .. } | AppError::Conflict(_) => Status::Conflict,
            AppError::Unauthorized(_) => Status::Forbidden,
            AppError::AuthError(_) => Status::Unauthorized,
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::Busy(_) => Status::ServiceUnavailable,
            AppError::InvariantViolation(_) | AppError::StorageError(_) => {
                Status::InternalServerError
            }
        };

        let json = json!({
            "error": self.to_string()
        });

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(None, Cursor::new(json.to_string()))
            .ok()
    }
}
