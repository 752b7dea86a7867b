use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{AdroitError, Result};

pub mod memory;
pub mod models;

pub use memory::MemoryStore;
pub use models::{ShortLink, canonical};

/// 短链接存储契约
///
/// 实现必须对短码大小写不敏感，并在并发下保持
/// 主索引与目的地反向索引一致。
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Atomically claim `code` and store a new link for `destination`.
    ///
    /// Check and insert happen in a single critical section. When the
    /// canonical code is already taken the store is left untouched and
    /// `DuplicateCode` is returned; under concurrent calls with the
    /// same code exactly one caller wins.
    async fn insert_if_absent(&self, code: &str, destination: &str) -> Result<ShortLink>;

    async fn get_by_code(&self, code: &str) -> Option<ShortLink>;

    /// All links whose destination equals `destination` exactly.
    /// No URL normalization is applied.
    async fn get_by_destination(&self, destination: &str) -> Vec<ShortLink>;

    /// Remove a link and its reverse index entry in one critical
    /// section. Returns false when the code was not present.
    async fn delete(&self, code: &str) -> bool;

    /// 点击数 +1，同时更新 last_accessed_at 与 updated_at（同一临界区）
    ///
    /// Returns false when the code was not present.
    async fn increment_clicks(&self, code: &str) -> bool;

    /// Point-in-time snapshot of every stored link.
    async fn load_all(&self) -> Vec<ShortLink>;

    async fn count(&self) -> u64;

    async fn get_backend_name(&self) -> String;
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create() -> Result<Arc<dyn LinkStore>> {
        let config = crate::config::get_config();
        let backend = config.storage.backend.as_str();

        match backend {
            "memory" => Ok(Arc::new(MemoryStore::new())),
            other => Err(AdroitError::config(format!(
                "Unknown storage backend '{}' (expected \"memory\")",
                other
            ))),
        }
    }
}
