use std::collections::HashMap;

use uuid::Uuid;

use fright_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{ContentCard, ContentType, User, UserSummary};
use crate::services::relations::RelationList;
use crate::store::UserStore;

/// Result of a relation toggle. `changed` is false when the call was a no-op.
#[derive(Debug)]
pub struct RelationOutcome {
    pub user: User,
    pub changed: bool,
}

pub fn require_user(store: &mut impl UserStore, id: Uuid, what: &str) -> AppResult<User> {
    store
        .find_user(id)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound, format!("{what} not found")))
}

fn require_content(store: &mut impl UserStore, kind: ContentType, id: Uuid) -> AppResult<()> {
    if store.find_content(kind, &[id])?.is_empty() {
        return Err(match kind {
            ContentType::Movie => AppError::new(ErrorCode::MovieNotFound, "movie not found"),
            ContentType::Tv => AppError::new(ErrorCode::TvShowNotFound, "tv show not found"),
        });
    }
    Ok(())
}

fn persist(store: &mut impl UserStore, user: User, touched: &[RelationList]) -> AppResult<RelationOutcome> {
    if touched.is_empty() {
        return Ok(RelationOutcome { user, changed: false });
    }
    let user = store.save_lists(&user, touched)?;
    Ok(RelationOutcome { user, changed: true })
}

fn remove_entry(
    store: &mut impl UserStore,
    user_id: Uuid,
    list: RelationList,
    target_id: Uuid,
) -> AppResult<RelationOutcome> {
    let mut user = require_user(store, user_id, "user")?;
    let touched = if list.remove(&mut user, target_id) { vec![list] } else { Vec::new() };
    let outcome = persist(store, user, &touched)?;

    tracing::info!(
        user_id = %user_id,
        target_id = %target_id,
        list = %list,
        changed = outcome.changed,
        "relation entry removed"
    );
    Ok(outcome)
}

// --- Friends ---

/// Rejects self-friending and friending someone the actor has blocked.
pub fn add_friend(store: &mut impl UserStore, user_id: Uuid, friend_id: Uuid) -> AppResult<RelationOutcome> {
    if user_id == friend_id {
        return Err(AppError::new(ErrorCode::CannotFriendSelf, "cannot add yourself as a friend"));
    }

    let mut user = require_user(store, user_id, "user")?;
    require_user(store, friend_id, "friend")?;

    if RelationList::BlockedUsers.contains(&user, friend_id) {
        return Err(AppError::new(ErrorCode::FriendIsBlocked, "unblock this user before adding them as a friend"));
    }

    let touched: &[RelationList] = if RelationList::Friends.insert(&mut user, friend_id) {
        &[RelationList::Friends]
    } else {
        &[]
    };
    let outcome = persist(store, user, touched)?;

    tracing::info!(user_id = %user_id, friend_id = %friend_id, changed = outcome.changed, "friend added");
    Ok(outcome)
}

pub fn remove_friend(store: &mut impl UserStore, user_id: Uuid, friend_id: Uuid) -> AppResult<RelationOutcome> {
    remove_entry(store, user_id, RelationList::Friends, friend_id)
}

pub fn list_friends(store: &mut impl UserStore, user_id: Uuid) -> AppResult<Vec<UserSummary>> {
    let user = require_user(store, user_id, "user")?;
    let found: HashMap<Uuid, User> = store
        .find_users(&user.friends)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    // Friends-list order; ids whose account is gone are skipped.
    Ok(user
        .friends
        .iter()
        .filter_map(|id| found.get(id).map(UserSummary::from))
        .collect())
}

// --- Blocks ---

/// Blocking also drops the target from the actor's friends.
pub fn block_user(store: &mut impl UserStore, user_id: Uuid, blocked_id: Uuid) -> AppResult<RelationOutcome> {
    if user_id == blocked_id {
        return Err(AppError::new(ErrorCode::CannotBlockSelf, "cannot block yourself"));
    }

    let mut user = require_user(store, user_id, "user")?;
    require_user(store, blocked_id, "blocked user")?;

    let mut touched = Vec::with_capacity(2);
    if RelationList::BlockedUsers.insert(&mut user, blocked_id) {
        touched.push(RelationList::BlockedUsers);
    }
    if RelationList::Friends.remove(&mut user, blocked_id) {
        touched.push(RelationList::Friends);
    }
    let unfriended = touched.contains(&RelationList::Friends);
    let outcome = persist(store, user, &touched)?;

    tracing::info!(
        user_id = %user_id,
        blocked_id = %blocked_id,
        changed = outcome.changed,
        unfriended,
        "user blocked"
    );
    Ok(outcome)
}

pub fn unblock_user(store: &mut impl UserStore, user_id: Uuid, blocked_id: Uuid) -> AppResult<RelationOutcome> {
    remove_entry(store, user_id, RelationList::BlockedUsers, blocked_id)
}

// --- Watchlists ---

fn watchlist_for(kind: ContentType) -> RelationList {
    match kind {
        ContentType::Movie => RelationList::MovieWatchlist,
        ContentType::Tv => RelationList::TvShowWatchlist,
    }
}

pub fn add_to_watchlist(
    store: &mut impl UserStore,
    user_id: Uuid,
    kind: ContentType,
    content_id: Uuid,
) -> AppResult<RelationOutcome> {
    let mut user = require_user(store, user_id, "user")?;
    require_content(store, kind, content_id)?;

    let list = watchlist_for(kind);
    let touched = if list.insert(&mut user, content_id) { vec![list] } else { Vec::new() };
    let outcome = persist(store, user, &touched)?;

    tracing::info!(
        user_id = %user_id,
        content_id = %content_id,
        content_type = %kind,
        changed = outcome.changed,
        "added to watchlist"
    );
    Ok(outcome)
}

pub fn remove_from_watchlist(
    store: &mut impl UserStore,
    user_id: Uuid,
    kind: ContentType,
    content_id: Uuid,
) -> AppResult<RelationOutcome> {
    remove_entry(store, user_id, watchlist_for(kind), content_id)
}

/// Watchlist entries as display cards, in list order.
pub fn list_watchlist(store: &mut impl UserStore, user_id: Uuid, kind: ContentType) -> AppResult<Vec<ContentCard>> {
    let user = require_user(store, user_id, "user")?;
    let ids = watchlist_for(kind).entries(&user);
    let items: HashMap<_, _> = store
        .find_content(kind, ids)?
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

    Ok(ids
        .iter()
        .map(|id| ContentCard::resolve(*id, kind, items.get(id)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn two_users() -> (MemoryStore, Uuid, Uuid) {
        let mut store = MemoryStore::new();
        let alice = store.add_user("alice").id;
        let bob = store.add_user("bob").id;
        (store, alice, bob)
    }

    #[test]
    fn add_friend_twice_is_idempotent() {
        let (mut store, alice, bob) = two_users();

        let first = add_friend(&mut store, alice, bob).unwrap();
        assert!(first.changed);
        let second = add_friend(&mut store, alice, bob).unwrap();
        assert!(!second.changed);

        assert_eq!(first.user.friends, second.user.friends);
        assert_eq!(store.user(alice).friends, vec![bob]);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn repeated_adds_keep_a_single_entry() {
        let (mut store, alice, bob) = two_users();
        for _ in 0..5 {
            add_friend(&mut store, alice, bob).unwrap();
        }
        let count = store.user(alice).friends.iter().filter(|id| **id == bob).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn friendship_is_one_sided() {
        let (mut store, alice, bob) = two_users();
        add_friend(&mut store, alice, bob).unwrap();
        assert!(store.user(bob).friends.is_empty());
    }

    #[test]
    fn removing_absent_friend_is_not_an_error() {
        let (mut store, alice, bob) = two_users();
        let outcome = remove_friend(&mut store, alice, bob).unwrap();
        assert!(!outcome.changed);
        assert!(outcome.user.friends.is_empty());
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn remove_friend_drops_the_entry() {
        let (mut store, alice, bob) = two_users();
        add_friend(&mut store, alice, bob).unwrap();
        let outcome = remove_friend(&mut store, alice, bob).unwrap();
        assert!(outcome.changed);
        assert!(store.user(alice).friends.is_empty());
    }

    #[test]
    fn unknown_actor_is_not_found_and_nothing_changes() {
        let (mut store, _alice, bob) = two_users();
        let before = store.users.clone();

        let err = add_friend(&mut store, Uuid::now_v7(), bob).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
        assert_eq!(store.users, before);
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn unknown_target_is_not_found() {
        let (mut store, alice, _bob) = two_users();
        let err = add_friend(&mut store, alice, Uuid::now_v7()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
        assert_eq!(err.to_string(), "friend not found");

        let err = block_user(&mut store, alice, Uuid::now_v7()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }

    #[test]
    fn remove_on_unknown_actor_is_not_found() {
        let (mut store, _alice, bob) = two_users();
        let err = remove_friend(&mut store, Uuid::now_v7(), bob).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
        let err = unblock_user(&mut store, Uuid::now_v7(), bob).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }

    #[test]
    fn self_targeting_is_rejected() {
        let (mut store, alice, _bob) = two_users();
        assert_eq!(add_friend(&mut store, alice, alice).unwrap_err().code(), ErrorCode::CannotFriendSelf);
        assert_eq!(block_user(&mut store, alice, alice).unwrap_err().code(), ErrorCode::CannotBlockSelf);
    }

    #[test]
    fn blocking_a_friend_unfriends_them() {
        let (mut store, alice, bob) = two_users();
        add_friend(&mut store, alice, bob).unwrap();

        let outcome = block_user(&mut store, alice, bob).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.user.blocked_users, vec![bob]);
        assert!(outcome.user.friends.is_empty());
        assert_eq!(store.user(alice).friends, Vec::<Uuid>::new());
    }

    #[test]
    fn block_is_idempotent() {
        let (mut store, alice, bob) = two_users();
        block_user(&mut store, alice, bob).unwrap();
        let again = block_user(&mut store, alice, bob).unwrap();
        assert!(!again.changed);
        assert_eq!(store.user(alice).blocked_users, vec![bob]);
    }

    #[test]
    fn cannot_friend_a_blocked_user_until_unblocked() {
        let (mut store, alice, bob) = two_users();
        block_user(&mut store, alice, bob).unwrap();

        let err = add_friend(&mut store, alice, bob).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FriendIsBlocked);
        assert!(store.user(alice).friends.is_empty());

        unblock_user(&mut store, alice, bob).unwrap();
        assert!(add_friend(&mut store, alice, bob).unwrap().changed);
    }

    #[test]
    fn unblocking_absent_user_is_a_noop() {
        let (mut store, alice, bob) = two_users();
        let outcome = unblock_user(&mut store, alice, bob).unwrap();
        assert!(!outcome.changed);
    }

    #[test]
    fn watchlist_requires_existing_content() {
        let (mut store, alice, _bob) = two_users();
        let err = add_to_watchlist(&mut store, alice, ContentType::Movie, Uuid::now_v7()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MovieNotFound);

        // A movie id is not a tv show id.
        let movie = store.add_content(ContentType::Movie, "Hereditary", Some(127));
        let err = add_to_watchlist(&mut store, alice, ContentType::Tv, movie.id).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TvShowNotFound);
    }

    #[test]
    fn watchlist_toggle_round_trip() {
        let (mut store, alice, _bob) = two_users();
        let show = store.add_content(ContentType::Tv, "The Haunting of Hill House", Some(55));

        assert!(add_to_watchlist(&mut store, alice, ContentType::Tv, show.id).unwrap().changed);
        assert!(!add_to_watchlist(&mut store, alice, ContentType::Tv, show.id).unwrap().changed);
        assert_eq!(store.user(alice).tv_show_watchlist, vec![show.id]);
        assert!(store.user(alice).movie_watchlist.is_empty());

        assert!(remove_from_watchlist(&mut store, alice, ContentType::Tv, show.id).unwrap().changed);
        assert!(!remove_from_watchlist(&mut store, alice, ContentType::Tv, show.id).unwrap().changed);
        assert!(store.user(alice).tv_show_watchlist.is_empty());
    }

    #[test]
    fn watchlist_lists_in_order_with_placeholders() {
        let (mut store, alice, _bob) = two_users();
        let first = store.add_content(ContentType::Movie, "The Thing", Some(109));
        let second = store.add_content(ContentType::Movie, "Alien", Some(117));
        add_to_watchlist(&mut store, alice, ContentType::Movie, first.id).unwrap();
        add_to_watchlist(&mut store, alice, ContentType::Movie, second.id).unwrap();
        store.movies.remove(&second.id);

        let cards = list_watchlist(&mut store, alice, ContentType::Movie).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "The Thing");
        assert!(cards[0].resolved);
        assert_eq!(cards[1].id, second.id);
        assert!(!cards[1].resolved);
    }

    #[test]
    fn friends_listed_in_insertion_order() {
        let (mut store, alice, bob) = two_users();
        let carol = store.add_user("carol").id;
        add_friend(&mut store, alice, carol).unwrap();
        add_friend(&mut store, alice, bob).unwrap();

        let friends = list_friends(&mut store, alice).unwrap();
        let names: Vec<_> = friends.iter().map(|f| f.username.as_str()).collect();
        assert_eq!(names, ["carol", "bob"]);
    }
}
