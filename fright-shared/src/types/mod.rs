pub mod api;
pub mod auth;
pub mod pagination;

pub use api::*;
pub use auth::*;
pub use pagination::*;
