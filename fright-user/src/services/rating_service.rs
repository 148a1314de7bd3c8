use chrono::{DateTime, Utc};
use uuid::Uuid;

use fright_shared::errors::{AppError, AppResult, ErrorCode};
use fright_shared::types::pagination::{Paginated, PaginationParams};

use crate::models::{ContentType, NewRating, Rating};
use crate::services::relation_service::require_user;
use crate::store::UserStore;

pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct RatingInput {
    pub content_id: Uuid,
    pub content_type: ContentType,
    pub rating: f64,
    pub review: Option<String>,
    pub watched_at: Option<DateTime<Utc>>,
}

/// Ratings run from 0 to 5 in half steps.
pub fn is_valid_rating(value: f64) -> bool {
    (0.0..=MAX_RATING).contains(&value) && (value * 2.0).fract() == 0.0
}

/// Appends a watched-history entry. The content runtime is copied onto the
/// entry so watch-time totals need no join later.
pub fn add_rating(store: &mut impl UserStore, user_id: Uuid, input: RatingInput) -> AppResult<Rating> {
    if !is_valid_rating(input.rating) {
        return Err(AppError::new(ErrorCode::InvalidRating, "rating must be between 0 and 5 in steps of 0.5"));
    }

    require_user(store, user_id, "user")?;
    let content = store
        .find_content(input.content_type, &[input.content_id])?
        .into_iter()
        .next()
        .ok_or_else(|| match input.content_type {
            ContentType::Movie => AppError::new(ErrorCode::MovieNotFound, "movie not found"),
            ContentType::Tv => AppError::new(ErrorCode::TvShowNotFound, "tv show not found"),
        })?;

    let review = input.review.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());

    let rating = store.insert_rating(NewRating {
        id: Uuid::now_v7(),
        user_id,
        content_id: content.id,
        content_type: input.content_type.as_str().to_string(),
        rating: input.rating,
        review,
        runtime: content.runtime,
        watched_at: input.watched_at.unwrap_or_else(Utc::now),
    })?;

    tracing::info!(
        user_id = %user_id,
        content_id = %content.id,
        content_type = %input.content_type,
        rating = rating.rating,
        "rating added"
    );

    Ok(rating)
}

pub fn list_ratings(
    store: &mut impl UserStore,
    user_id: Uuid,
    kind: Option<ContentType>,
    params: &PaginationParams,
) -> AppResult<Paginated<Rating>> {
    require_user(store, user_id, "user")?;
    let (items, total) = store.page_ratings(user_id, kind, params)?;
    Ok(Paginated::new(items, total, params))
}
