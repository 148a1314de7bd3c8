use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use fright_shared::errors::AppResult;
use fright_shared::extract::AppPath;
use fright_shared::types::ApiResponse;

use crate::models::{ContentCard, ContentType, User};
use crate::services::relation_service::{self, RelationOutcome};
use crate::store::PgStore;
use crate::AppState;

fn added(outcome: RelationOutcome) -> Json<ApiResponse<User>> {
    let message = if outcome.changed { "added to watchlist" } else { "already in watchlist" };
    Json(ApiResponse::ok_with_message(outcome.user, message))
}

fn removed(outcome: RelationOutcome) -> Json<ApiResponse<User>> {
    let message = if outcome.changed { "removed from watchlist" } else { "not in watchlist" };
    Json(ApiResponse::ok_with_message(outcome.user, message))
}

// --- /users/:user_id/movie-watchlist ---

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    AppPath((user_id, movie_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut conn = state.conn()?;
    let mut store = PgStore::new(&mut conn);
    relation_service::add_to_watchlist(&mut store, user_id, ContentType::Movie, movie_id).map(added)
}

pub async fn remove_movie(
    State(state): State<Arc<AppState>>,
    AppPath((user_id, movie_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut conn = state.conn()?;
    let mut store = PgStore::new(&mut conn);
    relation_service::remove_from_watchlist(&mut store, user_id, ContentType::Movie, movie_id).map(removed)
}

pub async fn list_movie_watchlist(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<ContentCard>>>> {
    let mut conn = state.conn()?;
    let cards = relation_service::list_watchlist(&mut PgStore::new(&mut conn), user_id, ContentType::Movie)?;
    Ok(Json(ApiResponse::ok(cards)))
}

// --- /users/:user_id/tv-watchlist ---

pub async fn add_tv_show(
    State(state): State<Arc<AppState>>,
    AppPath((user_id, tv_show_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut conn = state.conn()?;
    let mut store = PgStore::new(&mut conn);
    relation_service::add_to_watchlist(&mut store, user_id, ContentType::Tv, tv_show_id).map(added)
}

pub async fn remove_tv_show(
    State(state): State<Arc<AppState>>,
    AppPath((user_id, tv_show_id)): AppPath<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<User>>> {
    let mut conn = state.conn()?;
    let mut store = PgStore::new(&mut conn);
    relation_service::remove_from_watchlist(&mut store, user_id, ContentType::Tv, tv_show_id).map(removed)
}

pub async fn list_tv_watchlist(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<ContentCard>>>> {
    let mut conn = state.conn()?;
    let cards = relation_service::list_watchlist(&mut PgStore::new(&mut conn), user_id, ContentType::Tv)?;
    Ok(Json(ApiResponse::ok(cards)))
}
