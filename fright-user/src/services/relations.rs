//! Membership rules for the four relation lists a user owns.
//!
//! Lists are ordered and duplicate-free. Duplicates are prevented here, at
//! insertion, not by the database.

use uuid::Uuid;

use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationList {
    Friends,
    BlockedUsers,
    MovieWatchlist,
    TvShowWatchlist,
}

impl RelationList {
    pub fn entries(self, user: &User) -> &[Uuid] {
        match self {
            RelationList::Friends => &user.friends,
            RelationList::BlockedUsers => &user.blocked_users,
            RelationList::MovieWatchlist => &user.movie_watchlist,
            RelationList::TvShowWatchlist => &user.tv_show_watchlist,
        }
    }

    pub fn entries_mut(self, user: &mut User) -> &mut Vec<Uuid> {
        match self {
            RelationList::Friends => &mut user.friends,
            RelationList::BlockedUsers => &mut user.blocked_users,
            RelationList::MovieWatchlist => &mut user.movie_watchlist,
            RelationList::TvShowWatchlist => &mut user.tv_show_watchlist,
        }
    }

    pub fn contains(self, user: &User, id: Uuid) -> bool {
        self.entries(user).contains(&id)
    }

    /// Appends `id` unless it is already present. Returns whether the list changed.
    pub fn insert(self, user: &mut User, id: Uuid) -> bool {
        insert_unique(self.entries_mut(user), id)
    }

    /// Drops every occurrence of `id`. Returns whether the list changed.
    pub fn remove(self, user: &mut User, id: Uuid) -> bool {
        remove_all(self.entries_mut(user), id)
    }
}

impl std::fmt::Display for RelationList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RelationList::Friends => "friends",
            RelationList::BlockedUsers => "blocked_users",
            RelationList::MovieWatchlist => "movie_watchlist",
            RelationList::TvShowWatchlist => "tv_show_watchlist",
        })
    }
}

pub fn insert_unique(list: &mut Vec<Uuid>, id: Uuid) -> bool {
    if list.contains(&id) {
        return false;
    }
    list.push(id);
    true
}

pub fn remove_all(list: &mut Vec<Uuid>, id: Uuid) -> bool {
    let before = list.len();
    list.retain(|entry| *entry != id);
    list.len() != before
}
