use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest};
use crate::services::user_service::UserService;
use crate::utils::error::AppError;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;

/// Register a new account
#[openapi(tag = "Auth")]
#[post("/auth/register", format = "json", data = "<request>")]
pub async fn register(
    request: Json<RegisterRequest>,
    user_service: &State<UserService>,
) -> Result<Json<Value>, AppError> {
    let user_id = user_service.register(request.into_inner()).await?;
    Ok(Json(json!({ "user_id": user_id, "status": "registered" })))
}

/// Log in and receive a bearer token
#[openapi(tag = "Auth")]
#[post("/auth/login", format = "json", data = "<request>")]
pub async fn login(
    request: Json<LoginRequest>,
    user_service: &State<UserService>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = user_service.login(request.into_inner()).await?;
    Ok(Json(response))
}
