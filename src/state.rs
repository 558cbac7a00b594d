use crate::{
    config::Config,
    error::Result,
    services::{AdminService, Database, PollService},
    utils::Templates,
};
use std::sync::Arc;

/// 应用程序的共享状态
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Config,

    /// 投票服务
    pub poll_service: PollService,

    /// 管理服务
    pub admin_service: AdminService,

    /// 页面模板
    pub templates: Templates,
}

impl AppState {
    pub async fn new(config: Config, db: Arc<Database>) -> Result<Self> {
        let poll_service = PollService::new(db.clone()).await?;
        let admin_service = AdminService::new(db, config.admin_page_size).await?;
        let templates = Templates::new()?;

        Ok(Self {
            config,
            poll_service,
            admin_service,
            templates,
        })
    }

    /// 首页展示的问题数量
    pub fn index_page_size(&self) -> usize {
        self.config.index_page_size
    }
}
