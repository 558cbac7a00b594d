use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_format: String,

    // Database configuration
    pub database_url: String,
    pub database_max_connections: u32,

    // Page sizes
    pub index_page_size: usize,
    pub admin_page_size: usize,

    // Admin access
    pub admin_token: Option<String>,

    // CORS configuration
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "premios=debug,tower_http=debug".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://premios.db".to_string()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,

            index_page_size: env::var("INDEX_PAGE_SIZE")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            admin_page_size: env::var("ADMIN_PAGE_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,

            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// 内存数据库的开发配置，测试使用
impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "development".to_string(),
            log_level: "premios=debug".to_string(),
            log_format: "pretty".to_string(),
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            index_page_size: 5,
            admin_page_size: 100,
            admin_token: None,
            cors_allowed_origins: "http://localhost:3001".to_string(),
        }
    }
}
