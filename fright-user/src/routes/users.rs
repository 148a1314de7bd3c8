use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use fright_shared::errors::AppResult;
use fright_shared::extract::{AppJson, AppPath};
use fright_shared::middleware::issue_access_token;
use fright_shared::types::auth::AccessToken;
use fright_shared::types::ApiResponse;

use crate::models::User;
use crate::services::account_service::{self, Registration};
use crate::services::relation_service::require_user;
use crate::store::PgStore;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: User,
    pub token: AccessToken,
}

// --- POST /users ---

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 80, message = "name must be 1-80 characters"))]
    pub name: String,
    #[validate(
        length(min = 3, max = 30, message = "username must be 3-30 characters"),
        custom = "validate_username"
    )]
    pub username: String,
    #[validate(
        email(message = "invalid email format"),
        length(max = 254, message = "email must be at most 254 characters")
    )]
    pub email: String,
    pub password: String,
    #[validate(length(max = 120))]
    pub location: Option<String>,
    #[validate(range(min = 13, max = 120, message = "age must be between 13 and 120"))]
    pub age: Option<i32>,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_charset");
        err.message = Some("username may only contain letters, digits and underscores".into());
        Err(err)
    }
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SessionResponse>>)> {
    req.validate()?;

    let mut conn = state.conn()?;
    let user = account_service::register(
        &mut PgStore::new(&mut conn),
        Registration {
            name: req.name,
            username: req.username,
            email: req.email,
            password: req.password,
            location: req.location,
            age: req.age,
        },
    )?;
    let token = issue_access_token(user.id, &state.config.jwt_secret, state.config.jwt_access_ttl)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(SessionResponse { user, token }, "account created")),
    ))
}

// --- POST /login ---

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<SessionResponse>>> {
    req.validate()?;

    let mut conn = state.conn()?;
    let user = account_service::authenticate(&mut PgStore::new(&mut conn), &req.email, &req.password)?;
    let token = issue_access_token(user.id, &state.config.jwt_secret, state.config.jwt_access_ttl)?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(ApiResponse::ok(SessionResponse { user, token })))
}

// --- GET /users/:user_id ---

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut conn = state.conn()?;
    let user = require_user(&mut PgStore::new(&mut conn), user_id, "user")?;

    Ok(Json(ApiResponse::ok(user)))
}
