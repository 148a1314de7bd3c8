use std::sync::Arc;

use fright_shared::clients::db::create_pool;
use fright_user::config::AppConfig;
use fright_user::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fright_shared::middleware::init_tracing("fright-user");

    let config = AppConfig::load()?;
    let port = config.port;

    let db = create_pool(&config.database_url, config.db_pool_size)?;
    let metrics_handle = fright_shared::middleware::init_metrics()?;

    let state = Arc::new(AppState { db, config, metrics_handle });
    let app = router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "fright-user starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
