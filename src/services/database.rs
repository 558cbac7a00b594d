use crate::config::Config;
use crate::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{str::FromStr, time::Duration};
use tracing::{debug, error, info};

/// 数据库服务
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// 创建新的数据库实例
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Initializing database connection to {}", config.database_url);

        let in_memory = is_in_memory(&config.database_url);
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // 内存库随连接关闭而消失，只能保留一条永不过期的连接
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(config.database_max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;

        Ok(Self { pool })
    }

    /// 使用内存数据库并执行迁移，测试使用
    pub async fn in_memory() -> Result<Self> {
        let db = Self::new(&Config::default()).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// 验证数据库连接
    pub async fn verify_connection(&self) -> Result<()> {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => {
                info!("Database connection verified successfully");
                Ok(())
            }
            Err(e) => {
                error!("Failed to verify database connection: {}", e);
                Err(AppError::from(e))
            }
        }
    }

    /// 执行 migrations/ 下的表结构迁移
    pub async fn migrate(&self) -> Result<()> {
        debug!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
