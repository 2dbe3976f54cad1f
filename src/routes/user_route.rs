use crate::models::user::{UpdateProfileRequest, UserProfile};
use crate::services::user_service::UserService;
use crate::utils::error::AppError;
use crate::utils::jwt::{AdminUser, AuthenticatedUser};
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// The calling user's profile
#[openapi(tag = "Users")]
#[get("/users/me")]
pub async fn me(
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(user_service.current_user(&auth.username).await?))
}

/// Update the calling user's profile
#[openapi(tag = "Users")]
#[put("/users/me", format = "json", data = "<request>")]
pub async fn update_me(
    request: Json<UpdateProfileRequest>,
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(
        user_service
            .update_profile(&auth.username, request.into_inner())
            .await?,
    ))
}

/// List all accounts, for administration
#[openapi(tag = "Users")]
#[get("/users")]
pub async fn list_users(
    _admin: AdminUser,
    user_service: &State<UserService>,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    Ok(Json(user_service.list().await?))
}
