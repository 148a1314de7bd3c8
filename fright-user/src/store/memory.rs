use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use fright_shared::errors::{AppError, AppResult, ErrorCode};
use fright_shared::types::pagination::PaginationParams;

use crate::models::{ContentItem, ContentType, NewRating, NewUser, Rating, User};
use crate::services::relations::RelationList;

use super::UserStore;

/// In-memory store for unit tests. Counts writes so tests can assert that a
/// no-op toggle did not persist anything.
#[derive(Default)]
pub struct MemoryStore {
    pub users: HashMap<Uuid, User>,
    pub movies: HashMap<Uuid, ContentItem>,
    pub tv_shows: HashMap<Uuid, ContentItem>,
    pub ratings: Vec<Rating>,
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, username: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: username.to_uppercase(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: String::new(),
            location: None,
            age: None,
            profile_picture: None,
            friends: Vec::new(),
            blocked_users: Vec::new(),
            movie_watchlist: Vec::new(),
            tv_show_watchlist: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    pub fn add_content(&mut self, kind: ContentType, title: &str, runtime: Option<i32>) -> ContentItem {
        let item = ContentItem {
            id: Uuid::now_v7(),
            title: title.to_string(),
            poster_path: Some(format!("/posters/{}.jpg", title.to_lowercase().replace(' ', "-"))),
            runtime,
            release_date: None,
        };
        match kind {
            ContentType::Movie => self.movies.insert(item.id, item.clone()),
            ContentType::Tv => self.tv_shows.insert(item.id, item.clone()),
        };
        item
    }

    pub fn user(&self, id: Uuid) -> &User {
        &self.users[&id]
    }
}

impl UserStore for MemoryStore {
    fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }

    fn find_users(&mut self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        Ok(ids.iter().filter_map(|id| self.users.get(id).cloned()).collect())
    }

    fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.values().find(|u| u.email == email).cloned())
    }

    fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.values().find(|u| u.username == username).cloned())
    }

    fn insert_user(&mut self, user: NewUser) -> AppResult<User> {
        if self.users.values().any(|u| u.email == user.email || u.username == user.username) {
            return Err(AppError::new(ErrorCode::Conflict, "email or username already registered"));
        }
        let now = Utc::now();
        let stored = User {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            location: user.location,
            age: user.age,
            profile_picture: None,
            friends: Vec::new(),
            blocked_users: Vec::new(),
            movie_watchlist: Vec::new(),
            tv_show_watchlist: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.writes += 1;
        self.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn save_lists(&mut self, user: &User, lists: &[RelationList]) -> AppResult<User> {
        let stored = self
            .users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::from(diesel::result::Error::NotFound))?;
        for list in lists {
            *list.entries_mut(stored) = list.entries(user).to_vec();
        }
        stored.updated_at = Utc::now();
        self.writes += 1;
        Ok(stored.clone())
    }

    fn find_content(&mut self, kind: ContentType, ids: &[Uuid]) -> AppResult<Vec<ContentItem>> {
        let table = match kind {
            ContentType::Movie => &self.movies,
            ContentType::Tv => &self.tv_shows,
        };
        Ok(ids.iter().filter_map(|id| table.get(id).cloned()).collect())
    }

    fn insert_rating(&mut self, rating: NewRating) -> AppResult<Rating> {
        let stored = Rating {
            id: rating.id,
            user_id: rating.user_id,
            content_id: rating.content_id,
            content_type: rating.content_type,
            rating: rating.rating,
            review: rating.review,
            runtime: rating.runtime,
            watched_at: rating.watched_at,
            created_at: Utc::now(),
        };
        self.writes += 1;
        self.ratings.push(stored.clone());
        Ok(stored)
    }

    fn ratings_for(&mut self, user_id: Uuid) -> AppResult<Vec<Rating>> {
        let mut history: Vec<Rating> = self.ratings.iter().filter(|r| r.user_id == user_id).cloned().collect();
        history.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
        Ok(history)
    }

    fn page_ratings(
        &mut self,
        user_id: Uuid,
        kind: Option<ContentType>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Rating>, u64)> {
        let history: Vec<Rating> = self
            .ratings_for(user_id)?
            .into_iter()
            .filter(|r| kind.map_or(true, |k| r.content_type == k.as_str()))
            .collect();
        let total = history.len() as u64;
        let items = history
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .collect();
        Ok((items, total))
    }
}
