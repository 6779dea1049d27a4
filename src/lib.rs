//! tVNS-R remote triggering tools
//!
//! tVNS-R 远程触发工具: a mock device server and a client session runner.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod infrastructure;

// 重新导出常用类型
pub use config::Settings;
pub use infrastructure::web::MockServer;
