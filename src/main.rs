use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use premios::{config::Config, routes, services::Database, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // 初始化日志
    init_tracing(&config);

    info!("Starting Premios service...");

    // 初始化数据库连接
    let db = match Database::new(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to create database connection: {}", e);
            return Err(anyhow::anyhow!("Database initialization failed"));
        }
    };
    db.verify_connection().await?;
    db.migrate().await?;
    let db = Arc::new(db);

    if config.admin_token.is_none() {
        if config.is_production() {
            warn!("ADMIN_TOKEN is not set, the admin API is open to everyone");
        } else {
            info!("ADMIN_TOKEN is not set, admin API runs without authentication");
        }
    }

    // 创建应用状态
    let app_state = Arc::new(AppState::new(config.clone(), db).await?);

    let app = routes::app_router(app_state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server on http://{}", addr);

    axum::Server::bind(&addr.parse()?)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Premios stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("premios=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
