//! Runtime 模块
//!
//! 服务器启动与生命周期管理。

pub mod server;
pub mod startup;
