use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use fright_shared::errors::AppResult;
use fright_shared::extract::AppPath;
use fright_shared::types::ApiResponse;

use crate::models::User;
use crate::services::relation_service;
use crate::store::PgStore;
use crate::AppState;

// --- POST /users/:user_id/block/:blocked_user_id ---

pub async fn block_user(
    State(state): State<Arc<AppState>>,
    AppPath((user_id, blocked_user_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut conn = state.conn()?;
    let outcome = relation_service::block_user(&mut PgStore::new(&mut conn), user_id, blocked_user_id)?;

    let message = if outcome.changed { "user blocked" } else { "user already blocked" };
    Ok(Json(ApiResponse::ok_with_message(outcome.user, message)))
}

// --- DELETE /users/:user_id/unblock/:blocked_user_id ---

pub async fn unblock_user(
    State(state): State<Arc<AppState>>,
    AppPath((user_id, blocked_user_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut conn = state.conn()?;
    let outcome = relation_service::unblock_user(&mut PgStore::new(&mut conn), user_id, blocked_user_id)?;

    let message = if outcome.changed { "user unblocked" } else { "user was not blocked" };
    Ok(Json(ApiResponse::ok_with_message(outcome.user, message)))
}
