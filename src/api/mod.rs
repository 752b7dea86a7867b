//! HTTP API 层
//!
//! 包含 JSON 管理接口、健康检查与重定向入口。

pub mod helpers;
pub mod services;
pub mod types;

pub use services::{AppStartTime, health_routes, redirect_routes, urls_routes};
pub use types::ApiResponse;
