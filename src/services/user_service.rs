use crate::models::user::{
    LoginRequest, LoginResponse, NewUser, RegisterRequest, Role, UpdateProfileRequest, User,
    UserProfile,
};
use crate::store::UserStore;
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt::{self, AuthSettings};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    auth: AuthSettings,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, auth: AuthSettings) -> Self {
        UserService { users, auth }
    }

    /// Register a new account. Role defaults to `User`; an admin account
    /// can be requested explicitly.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<i64> {
        request.validate()?;

        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "username {} already exists",
                request.username
            )));
        }

        let hashed_password = hash(request.password.as_bytes(), DEFAULT_COST)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        let user = self
            .users
            .insert(NewUser {
                username: request.username,
                password: hashed_password,
                full_name: request.full_name,
                role: request.role.unwrap_or(Role::User),
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "user registered");
        Ok(user.id)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::AuthError("invalid credentials".to_string()))?;

        let password_matches = verify(request.password.as_bytes(), &user.password)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        if !password_matches {
            return Err(AppError::AuthError("invalid credentials".to_string()));
        }

        let token = jwt::generate_token(&user, &self.auth)?;

        Ok(LoginResponse {
            token,
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }

    pub async fn current_user(&self, username: &str) -> AppResult<UserProfile> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::IdentityNotFound(username.to_string()))?;

        Ok(user.into())
    }

    pub async fn update_profile(
        &self,
        username: &str,
        request: UpdateProfileRequest,
    ) -> AppResult<UserProfile> {
        request.validate()?;

        let mut user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::IdentityNotFound(username.to_string()))?;

        user.full_name = request.full_name;
        self.users.save(&user).await?;

        Ok(user.into())
    }

    pub async fn list(&self) -> AppResult<Vec<UserProfile>> {
        let users = self.users.list().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }
}
