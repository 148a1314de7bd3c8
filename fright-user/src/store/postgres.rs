use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use fright_shared::errors::{AppError, AppResult, ErrorCode};
use fright_shared::types::pagination::PaginationParams;

use crate::models::{ContentItem, ContentType, NewRating, NewUser, Rating, User};
use crate::schema::{movies, ratings, tv_shows, users};
use crate::services::relations::RelationList;

use super::UserStore;

pub struct PgStore<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PgStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl UserStore for PgStore<'_> {
    fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>> {
        Ok(users::table.find(id).first::<User>(self.conn).optional()?)
    }

    fn find_users(&mut self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(users::table.filter(users::id.eq_any(ids)).load::<User>(self.conn)?)
    }

    fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        Ok(users::table
            .filter(users::email.eq(email))
            .first::<User>(self.conn)
            .optional()?)
    }

    fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<User>> {
        Ok(users::table
            .filter(users::username.eq(username))
            .first::<User>(self.conn)
            .optional()?)
    }

    fn insert_user(&mut self, user: NewUser) -> AppResult<User> {
        diesel::insert_into(users::table)
            .values(&user)
            .get_result::<User>(self.conn)
            .map_err(|e| match e {
                // Lost a race with a concurrent registration.
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                    tracing::warn!(constraint = ?info.constraint_name(), "duplicate user on insert");
                    AppError::new(ErrorCode::Conflict, "email or username already registered")
                }
                other => AppError::Database(other),
            })
    }

    fn save_lists(&mut self, user: &User, lists: &[RelationList]) -> AppResult<User> {
        let saved = self.conn.transaction::<User, DieselError, _>(|conn| {
            for list in lists {
                match list {
                    RelationList::Friends => diesel::update(users::table.find(user.id))
                        .set(users::friends.eq(&user.friends))
                        .execute(conn)?,
                    RelationList::BlockedUsers => diesel::update(users::table.find(user.id))
                        .set(users::blocked_users.eq(&user.blocked_users))
                        .execute(conn)?,
                    RelationList::MovieWatchlist => diesel::update(users::table.find(user.id))
                        .set(users::movie_watchlist.eq(&user.movie_watchlist))
                        .execute(conn)?,
                    RelationList::TvShowWatchlist => diesel::update(users::table.find(user.id))
                        .set(users::tv_show_watchlist.eq(&user.tv_show_watchlist))
                        .execute(conn)?,
                };
            }
            diesel::update(users::table.find(user.id))
                .set(users::updated_at.eq(Utc::now()))
                .get_result::<User>(conn)
        })?;
        Ok(saved)
    }

    fn find_content(&mut self, kind: ContentType, ids: &[Uuid]) -> AppResult<Vec<ContentItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let items = match kind {
            ContentType::Movie => movies::table
                .filter(movies::id.eq_any(ids))
                .load::<ContentItem>(self.conn)?,
            ContentType::Tv => tv_shows::table
                .filter(tv_shows::id.eq_any(ids))
                .load::<ContentItem>(self.conn)?,
        };
        Ok(items)
    }

    fn insert_rating(&mut self, rating: NewRating) -> AppResult<Rating> {
        Ok(diesel::insert_into(ratings::table)
            .values(&rating)
            .get_result::<Rating>(self.conn)?)
    }

    fn ratings_for(&mut self, user_id: Uuid) -> AppResult<Vec<Rating>> {
        Ok(ratings::table
            .filter(ratings::user_id.eq(user_id))
            .order((ratings::watched_at.desc(), ratings::created_at.desc()))
            .load::<Rating>(self.conn)?)
    }

    fn page_ratings(
        &mut self,
        user_id: Uuid,
        kind: Option<ContentType>,
        params: &PaginationParams,
    ) -> AppResult<(Vec<Rating>, u64)> {
        let mut count_query = ratings::table
            .filter(ratings::user_id.eq(user_id))
            .into_boxed();
        let mut page_query = ratings::table
            .filter(ratings::user_id.eq(user_id))
            .into_boxed();
        if let Some(kind) = kind {
            count_query = count_query.filter(ratings::content_type.eq(kind.as_str()));
            page_query = page_query.filter(ratings::content_type.eq(kind.as_str()));
        }

        let total: i64 = count_query.count().get_result(self.conn)?;
        let items = page_query
            .order((ratings::watched_at.desc(), ratings::created_at.desc()))
            .offset(params.offset() as i64)
            .limit(params.limit() as i64)
            .load::<Rating>(self.conn)?;

        Ok((items, total as u64))
    }
}
