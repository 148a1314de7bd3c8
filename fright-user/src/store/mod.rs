//! Persistence seam for the user service.
//!
//! Services talk to a [`UserStore`] rather than to diesel directly so the
//! relation and aggregation rules can run against [`memory::MemoryStore`]
//! in unit tests. [`PgStore`] is the production implementation.

mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

use uuid::Uuid;

use fright_shared::errors::AppResult;
use fright_shared::types::pagination::PaginationParams;

use crate::models::{ContentItem, ContentType, NewRating, NewUser, Rating, User};
use crate::services::relations::RelationList;

pub trait UserStore {
    fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>>;

    /// Loads every user in `ids` that exists, in no particular order.
    fn find_users(&mut self, ids: &[Uuid]) -> AppResult<Vec<User>>;

    fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>>;

    fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<User>>;

    fn insert_user(&mut self, user: NewUser) -> AppResult<User>;

    /// Persists the named relation lists of `user` in one atomic write and
    /// returns the stored row. Lists not named are left untouched.
    fn save_lists(&mut self, user: &User, lists: &[RelationList]) -> AppResult<User>;

    /// Loads every content item of `kind` in `ids` that exists.
    fn find_content(&mut self, kind: ContentType, ids: &[Uuid]) -> AppResult<Vec<ContentItem>>;

    fn insert_rating(&mut self, rating: NewRating) -> AppResult<Rating>;

    /// Full watched history of a user, most recent watch first.
    fn ratings_for(&mut self, user_id: Uuid) -> AppResult<Vec<Rating>>;

    /// One page of watched history plus the total number of matching entries.
    fn page_ratings(
        &mut self,
        user_id: Uuid,
        kind: Option<ContentType>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Rating>, u64)>;
}
