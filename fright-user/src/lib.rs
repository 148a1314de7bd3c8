use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::{middleware, Router};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fright_shared::clients::db::DbPool;
use fright_shared::errors::{AppError, AppResult};
use fright_shared::middleware::{metrics_middleware, JwtSecret};

pub mod config;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;

use config::AppConfig;

pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Built once in `main` and shared by every handler.
pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn conn(&self) -> AppResult<DbConn> {
        self.db.get().map_err(|e| AppError::internal(format!("db pool error: {e}")))
    }
}

impl JwtSecret for AppState {
    fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .route("/login", post(routes::users::login))
        .route("/users", post(routes::users::register))
        .route("/users/:user_id", get(routes::users::get_user))
        .route("/users/:user_id/profile", get(routes::profile::get_public_profile))
        .route("/users/:user_id/friends", get(routes::friends::list_friends))
        .route(
            "/users/:user_id/friends/:friend_id",
            post(routes::friends::add_friend).delete(routes::friends::remove_friend),
        )
        .route("/users/:user_id/block/:blocked_user_id", post(routes::blocks::block_user))
        .route("/users/:user_id/unblock/:blocked_user_id", delete(routes::blocks::unblock_user))
        .route("/users/:user_id/movie-watchlist", get(routes::watchlist::list_movie_watchlist))
        .route(
            "/users/:user_id/movie-watchlist/:movie_id",
            post(routes::watchlist::add_movie).delete(routes::watchlist::remove_movie),
        )
        .route("/users/:user_id/tv-watchlist", get(routes::watchlist::list_tv_watchlist))
        .route(
            "/users/:user_id/tv-watchlist/:tv_show_id",
            post(routes::watchlist::add_tv_show).delete(routes::watchlist::remove_tv_show),
        )
        .route(
            "/users/:user_id/ratings",
            get(routes::ratings::list_ratings).post(routes::ratings::add_rating),
        )
        .layer(middleware::from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
