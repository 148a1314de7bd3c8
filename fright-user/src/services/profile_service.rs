use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use fright_shared::errors::AppResult;

use crate::models::{ContentCard, ContentItem, ContentType, Rating, User, UserSummary};
use crate::services::relation_service::require_user;
use crate::store::UserStore;

pub const TOP_RATED_LIMIT: usize = 3;

#[derive(Debug, Serialize, PartialEq)]
pub struct PublicProfile {
    #[serde(flatten)]
    pub user: UserSummary,
    pub location: Option<String>,
    pub member_since: DateTime<Utc>,
    pub friend_count: usize,
    pub movie_watchlist_count: usize,
    pub tv_watchlist_count: usize,
    pub movies: WatchStats,
    pub tv_shows: WatchStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WatchStats {
    /// Distinct titles watched.
    pub watched_count: usize,
    /// 0.0 when nothing was rated.
    pub average_rating: f64,
    pub review_count: usize,
    pub watch_time_minutes: i64,
    pub top_rated: Vec<TopRatedEntry>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TopRatedEntry {
    #[serde(flatten)]
    pub content: ContentCard,
    pub rating: f64,
    pub watched_at: DateTime<Utc>,
}

/// How the viewer relates to the profile owner, from the viewer's lists.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Relationship {
    pub is_self: bool,
    pub is_friend: bool,
    pub is_blocked: bool,
}

impl Relationship {
    pub fn between(viewer: &User, target: &User) -> Self {
        Self {
            is_self: viewer.id == target.id,
            is_friend: viewer.friends.contains(&target.id),
            is_blocked: viewer.blocked_users.contains(&target.id),
        }
    }
}

/// Loads everything the profile needs and aggregates it. A missing viewer
/// only drops the relationship flags.
pub fn public_profile(store: &mut impl UserStore, user_id: Uuid, viewer_id: Option<Uuid>) -> AppResult<PublicProfile> {
    let user = require_user(store, user_id, "user")?;
    let history = store.ratings_for(user_id)?;

    let movies = resolve_top(store, &history, ContentType::Movie);
    let tv_shows = resolve_top(store, &history, ContentType::Tv);

    let relationship = match viewer_id {
        Some(id) if id == user.id => Some(Relationship::between(&user, &user)),
        Some(id) => store.find_user(id)?.map(|viewer| Relationship::between(&viewer, &user)),
        None => None,
    };

    let profile = build_profile(&user, &history, &movies, &tv_shows, relationship);

    tracing::debug!(
        user_id = %user_id,
        ratings = history.len(),
        unresolved = profile.movies.top_rated.iter().chain(&profile.tv_shows.top_rated).filter(|e| !e.content.resolved).count(),
        "public profile built"
    );
    Ok(profile)
}

/// Looks up display fields for the entries that can make a top list. A failed
/// lookup leaves the map empty and the entries render as placeholders.
fn resolve_top(store: &mut impl UserStore, history: &[Rating], kind: ContentType) -> HashMap<Uuid, ContentItem> {
    let ids: Vec<Uuid> = top_rated(history, kind).iter().map(|r| r.content_id).collect();
    match store.find_content(kind, &ids) {
        Ok(items) => items.into_iter().map(|item| (item.id, item)).collect(),
        Err(e) => {
            tracing::warn!(content_type = %kind, error = %e, "content lookup failed, using placeholders");
            HashMap::new()
        }
    }
}

pub fn build_profile(
    user: &User,
    history: &[Rating],
    movies: &HashMap<Uuid, ContentItem>,
    tv_shows: &HashMap<Uuid, ContentItem>,
    relationship: Option<Relationship>,
) -> PublicProfile {
    PublicProfile {
        user: UserSummary::from(user),
        location: user.location.clone(),
        member_since: user.created_at,
        friend_count: user.friends.len(),
        movie_watchlist_count: user.movie_watchlist.len(),
        tv_watchlist_count: user.tv_show_watchlist.len(),
        movies: watch_stats(history, ContentType::Movie, movies),
        tv_shows: watch_stats(history, ContentType::Tv, tv_shows),
        relationship,
    }
}

pub fn watch_stats(history: &[Rating], kind: ContentType, content: &HashMap<Uuid, ContentItem>) -> WatchStats {
    let entries: Vec<&Rating> = history.iter().filter(|r| r.kind() == Some(kind)).collect();

    let watched_count = entries.iter().map(|r| r.content_id).collect::<HashSet<_>>().len();
    let review_count = entries.iter().filter(|r| r.has_review()).count();
    let watch_time_minutes = entries.iter().map(|r| i64::from(r.runtime.unwrap_or(0).max(0))).sum();

    let top_rated = top_rated(history, kind)
        .into_iter()
        .map(|r| TopRatedEntry {
            content: ContentCard::resolve(r.content_id, kind, content.get(&r.content_id)),
            rating: r.rating,
            watched_at: r.watched_at,
        })
        .collect();

    WatchStats {
        watched_count,
        average_rating: average(entries.iter().map(|r| r.rating)),
        review_count,
        watch_time_minutes,
        top_rated,
    }
}

/// Mean rounded to two decimals; 0.0 for no values.
pub fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    (sum / f64::from(count) * 100.0).round() / 100.0
}

/// Highest rated titles of `kind`, one entry per title, ties broken by the
/// most recent watch.
pub fn top_rated(history: &[Rating], kind: ContentType) -> Vec<&Rating> {
    let mut entries: Vec<&Rating> = history.iter().filter(|r| r.kind() == Some(kind)).collect();
    entries.sort_by(|a, b| match b.rating.total_cmp(&a.rating) {
        Ordering::Equal => b.watched_at.cmp(&a.watched_at),
        other => other,
    });
    let mut seen = HashSet::new();
    entries.retain(|r| seen.insert(r.content_id));
    entries.truncate(TOP_RATED_LIMIT);
    entries
}
