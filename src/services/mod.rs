pub mod admin;
pub mod database;
pub mod poll;

// 重新导出常用类型
pub use admin::AdminService;
pub use database::Database;
pub use poll::PollService;
