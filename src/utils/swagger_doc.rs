use crate::utils::error::AppError;
use indexmap::IndexMap;
use okapi::openapi3::SchemaObject;
use rocket::http::Status;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::RefOr;
use rocket_okapi::okapi::openapi3::{MediaType, Response, Responses};
use rocket_okapi::response::OpenApiResponderInner;
use serde_json::json;

impl<'r> OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();

        let error_responses = [
            (
                Status::BadRequest,
                "Bad Request",
                AppError::ValidationError("reservation quantity must be at least 1".to_string()),
            ),
            (
                Status::Unauthorized,
                "Unauthorized",
                AppError::AuthError("invalid credentials".to_string()),
            ),
            (
                Status::Forbidden,
                "Forbidden",
                AppError::Unauthorized("reservation belongs to another user".to_string()),
            ),
            (Status::NotFound, "Not Found", AppError::FlightNotFound(42)),
            (
                Status::Conflict,
                "Conflict",
                AppError::InsufficientInventory {
                    requested: 2,
                    available: 1,
                },
            ),
            (
                Status::ServiceUnavailable,
                "Service Unavailable",
                AppError::Busy("flight 42 is under heavy contention".to_string()),
            ),
            (
                Status::InternalServerError,
                "Internal Server Error",
                AppError::StorageError("connection lost".to_string()),
            ),
        ];

        for (status, description, error) in error_responses {
            responses.responses.insert(
                status.code.to_string(),
                RefOr::Object(Response {
                    description: description.to_string(),
                    content: {
                        let mut content = IndexMap::new();
                        content.insert(
                            "application/json".to_string(),
                            MediaType {
                                schema: Some(SchemaObject::default()),
                                example: Some(json!({
                                    "error": error.to_string()
                                })),
                                ..Default::default()
                            },
                        );
                        content
                    },
                    ..Default::default()
                }),
            );
        }

        Ok(responses)
    }
}
