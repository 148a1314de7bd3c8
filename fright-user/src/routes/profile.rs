use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use fright_shared::errors::AppResult;
use fright_shared::extract::AppPath;
use fright_shared::middleware::OptionalAuthUser;
use fright_shared::types::ApiResponse;

use crate::services::profile_service::{self, PublicProfile};
use crate::store::PgStore;
use crate::AppState;

// --- GET /users/:user_id/profile ---

/// Public profile. A valid bearer token adds the viewer's relationship flags.
pub async fn get_public_profile(
    OptionalAuthUser(viewer): OptionalAuthUser,
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<PublicProfile>>> {
    let mut conn = state.conn()?;
    let profile = profile_service::public_profile(
        &mut PgStore::new(&mut conn),
        user_id,
        viewer.map(|v| v.id),
    )?;

    Ok(Json(ApiResponse::ok(profile)))
}
