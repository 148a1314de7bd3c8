pub mod blocks;
pub mod friends;
pub mod health;
pub mod profile;
pub mod ratings;
pub mod users;
pub mod watchlist;
