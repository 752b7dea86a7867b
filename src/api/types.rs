//! API 类型定义

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::ShortLink;

/// 统一 JSON 响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateUrlRequest {
    pub long_url: String,
    #[serde(default)]
    pub custom_short_code: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LookupQuery {
    #[serde(default)]
    pub long_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UrlResponse {
    pub id: Uuid,
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub click_count: u64,
    pub created_at: String,
    pub last_accessed_at: Option<String>,
}

impl UrlResponse {
    pub fn from_link(link: ShortLink, base_url: &str) -> Self {
        Self {
            id: link.id,
            short_url: format!("{}/{}", base_url, link.code),
            short_code: link.code,
            long_url: link.destination,
            click_count: link.click_count,
            created_at: link.created_at.to_rfc3339(),
            last_accessed_at: link.last_accessed_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// 统计信息响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UrlStatsResponse {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub click_count: u64,
    pub created_at: String,
    pub last_accessed_at: Option<String>,
    pub average_clicks_per_day: f64,
    pub days_since_creation: i64,
}

impl UrlStatsResponse {
    pub fn from_link(link: ShortLink, base_url: &str) -> Self {
        // 不足一天按创建当天算，日均直接取总点击数
        let days = (Utc::now() - link.created_at).num_days();
        let average = if days > 0 {
            link.click_count as f64 / days as f64
        } else {
            link.click_count as f64
        };

        Self {
            short_url: format!("{}/{}", base_url, link.code),
            short_code: link.code,
            long_url: link.destination,
            click_count: link.click_count,
            created_at: link.created_at.to_rfc3339(),
            last_accessed_at: link.last_accessed_at.map(|dt| dt.to_rfc3339()),
            average_clicks_per_day: (average * 100.0).round() / 100.0,
            days_since_creation: days,
        }
    }
}

// ============ 健康检查相关类型 ============

/// 存储健康检查状态
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub links_count: Option<u64>,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 健康检查项容器
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthChecks {
    pub storage: HealthStorageCheck,
}

/// 健康检查响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u32,
    pub checks: HealthChecks,
    pub response_time_ms: u32,
}
