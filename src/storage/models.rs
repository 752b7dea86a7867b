use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 短码的规范形式（小写），用作存储键
///
/// 展示形式保留用户输入的大小写，唯一性按规范形式判定。
pub fn canonical(code: &str) -> String {
    code.to_lowercase()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: Uuid,
    /// 展示形式的短码；查找一律大小写不敏感
    pub code: String,
    pub destination: String,
    #[serde(default)]
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Create a fresh link with a new id and a zeroed click counter.
    pub fn new(code: impl Into<String>, destination: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            destination: destination.into(),
            click_count: 0,
            created_at: now,
            updated_at: now,
            last_accessed_at: None,
        }
    }
}
