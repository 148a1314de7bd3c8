use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use fright_shared::errors::AppResult;
use fright_shared::extract::AppPath;
use fright_shared::types::ApiResponse;

use crate::models::{User, UserSummary};
use crate::services::relation_service;
use crate::store::PgStore;
use crate::AppState;

// --- POST /users/:user_id/friends/:friend_id ---

pub async fn add_friend(
    State(state): State<Arc<AppState>>,
    AppPath((user_id, friend_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut conn = state.conn()?;
    let outcome = relation_service::add_friend(&mut PgStore::new(&mut conn), user_id, friend_id)?;

    let message = if outcome.changed { "friend added" } else { "already friends" };
    Ok(Json(ApiResponse::ok_with_message(outcome.user, message)))
}

// --- DELETE /users/:user_id/friends/:friend_id ---

pub async fn remove_friend(
    State(state): State<Arc<AppState>>,
    AppPath((user_id, friend_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut conn = state.conn()?;
    let outcome = relation_service::remove_friend(&mut PgStore::new(&mut conn), user_id, friend_id)?;

    let message = if outcome.changed { "friend removed" } else { "not a friend" };
    Ok(Json(ApiResponse::ok_with_message(outcome.user, message)))
}

// --- GET /users/:user_id/friends ---

pub async fn list_friends(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<UserSummary>>>> {
    let mut conn = state.conn()?;
    let friends = relation_service::list_friends(&mut PgStore::new(&mut conn), user_id)?;

    Ok(Json(ApiResponse::ok(friends)))
}
