pub mod account_service;
pub mod profile_service;
pub mod rating_service;
pub mod relation_service;
pub mod relations;
