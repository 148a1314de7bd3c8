use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{ratings, users};

// --- User ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone, PartialEq)]
#[diesel(table_name = users)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub profile_picture: Option<String>,
    pub friends: Vec<Uuid>,
    pub blocked_users: Vec<Uuid>,
    pub movie_watchlist: Vec<Uuid>,
    pub tv_show_watchlist: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub location: Option<String>,
    pub age: Option<i32>,
}

/// Compact view of a user used in friend lists.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub profile_picture: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            profile_picture: user.profile_picture.clone(),
        }
    }
}

// --- Content ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Tv,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Tv => "tv",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentType::Movie),
            "tv" => Ok(ContentType::Tv),
            _ => Err(format!("unknown content type: {s}")),
        }
    }
}

/// A row of either `movies` or `tv_shows`; both tables share this shape.
#[derive(Debug, Queryable, Serialize, Clone, PartialEq)]
pub struct ContentItem {
    pub id: Uuid,
    pub title: String,
    pub poster_path: Option<String>,
    pub runtime: Option<i32>,
    pub release_date: Option<NaiveDate>,
}

/// Display fields for a content reference. Ids that no longer resolve get
/// placeholder values instead of failing the whole response.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ContentCard {
    pub id: Uuid,
    pub content_type: ContentType,
    pub title: String,
    pub poster_path: Option<String>,
    pub resolved: bool,
}

pub const UNKNOWN_TITLE: &str = "Unknown title";

impl ContentCard {
    pub fn resolve(id: Uuid, content_type: ContentType, item: Option<&ContentItem>) -> Self {
        match item {
            Some(item) => Self {
                id,
                content_type,
                title: item.title.clone(),
                poster_path: item.poster_path.clone(),
                resolved: true,
            },
            None => Self {
                id,
                content_type,
                title: UNKNOWN_TITLE.to_string(),
                poster_path: None,
                resolved: false,
            },
        }
    }
}

// --- Rating ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone, PartialEq)]
#[diesel(table_name = ratings)]
pub struct Rating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub content_type: String,
    pub rating: f64,
    pub review: Option<String>,
    pub runtime: Option<i32>,
    pub watched_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn kind(&self) -> Option<ContentType> {
        self.content_type.parse().ok()
    }

    pub fn has_review(&self) -> bool {
        self.review.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = ratings)]
pub struct NewRating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub content_type: String,
    pub rating: f64,
    pub review: Option<String>,
    pub runtime: Option<i32>,
    pub watched_at: DateTime<Utc>,
}
