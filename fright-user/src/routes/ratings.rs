use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use fright_shared::errors::AppResult;
use fright_shared::extract::{AppJson, AppPath, AppQuery};
use fright_shared::types::pagination::{Paginated, PaginationParams};
use fright_shared::types::ApiResponse;

use crate::models::{ContentType, Rating};
use crate::services::rating_service::{self, is_valid_rating, RatingInput};
use crate::store::PgStore;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct AddRatingRequest {
    pub content_id: Uuid,
    pub content_type: ContentType,
    #[validate(custom = "validate_rating")]
    pub rating: f64,
    #[validate(length(max = 5000, message = "review must be at most 5000 characters"))]
    pub review: Option<String>,
    pub watched_at: Option<DateTime<Utc>>,
}

fn validate_rating(value: f64) -> Result<(), ValidationError> {
    if is_valid_rating(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("rating_step");
        err.message = Some("rating must be between 0 and 5 in steps of 0.5".into());
        Err(err)
    }
}

impl From<AddRatingRequest> for RatingInput {
    fn from(req: AddRatingRequest) -> Self {
        Self {
            content_id: req.content_id,
            content_type: req.content_type,
            rating: req.rating,
            review: req.review,
            watched_at: req.watched_at,
        }
    }
}

// --- POST /users/:user_id/ratings ---

pub async fn add_rating(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<Uuid>,
    AppJson(req): AppJson<AddRatingRequest>,
) -> AppResult<Json<ApiResponse<Rating>>> {
    req.validate()?;

    let mut conn = state.conn()?;
    let rating = rating_service::add_rating(&mut PgStore::new(&mut conn), user_id, req.into())?;

    Ok(Json(ApiResponse::ok_with_message(rating, "rating added")))
}

// --- GET /users/:user_id/ratings ---

#[derive(Debug, Deserialize)]
pub struct ListRatingsQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub content_type: Option<ContentType>,
}

impl ListRatingsQuery {
    fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.per_page),
        )
    }
}

pub async fn list_ratings(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<ListRatingsQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Rating>>>> {
    let mut conn = state.conn()?;
    let page = rating_service::list_ratings(
        &mut PgStore::new(&mut conn),
        user_id,
        query.content_type,
        &query.pagination(),
    )?;

    Ok(Json(ApiResponse::ok(page)))
}
