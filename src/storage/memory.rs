//! 内存存储后端
//!
//! 主索引（规范短码 -> 链接）与目的地反向索引放在同一把 RwLock 内，
//! 所有写操作共用一个临界区，两个索引在任何时刻互相一致。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::LinkStore;
use super::models::{ShortLink, canonical};
use crate::errors::{AdroitError, Result};

#[derive(Default)]
struct Indexes {
    /// 规范短码 -> 链接（link.code 保留展示大小写）
    by_code: HashMap<String, ShortLink>,
    /// 目的地 -> 规范短码集合（精确字符串匹配，不做归一化）
    by_destination: HashMap<String, HashSet<String>>,
}

pub struct MemoryStore {
    indexes: RwLock<Indexes>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            indexes: RwLock::new(Indexes::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn insert_if_absent(&self, code: &str, destination: &str) -> Result<ShortLink> {
        let key = canonical(code);
        let mut idx = self.indexes.write();

        // 检查与插入必须在同一写锁内完成，并发抢占同码时只有一个赢家
        if idx.by_code.contains_key(&key) {
            return Err(AdroitError::duplicate_code(format!(
                "Short code '{}' is already in use",
                code
            )));
        }

        let link = ShortLink::new(code, destination);
        idx.by_destination
            .entry(link.destination.clone())
            .or_default()
            .insert(key.clone());
        idx.by_code.insert(key, link.clone());

        Ok(link)
    }

    async fn get_by_code(&self, code: &str) -> Option<ShortLink> {
        self.indexes.read().by_code.get(&canonical(code)).cloned()
    }

    async fn get_by_destination(&self, destination: &str) -> Vec<ShortLink> {
        let idx = self.indexes.read();
        match idx.by_destination.get(destination) {
            Some(keys) => keys
                .iter()
                .filter_map(|key| idx.by_code.get(key).cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    async fn delete(&self, code: &str) -> bool {
        let key = canonical(code);
        let mut idx = self.indexes.write();

        let Some(link) = idx.by_code.remove(&key) else {
            return false;
        };

        // 同一临界区内维护反向索引，清掉变空的桶
        let emptied = match idx.by_destination.get_mut(&link.destination) {
            Some(codes) => {
                codes.remove(&key);
                codes.is_empty()
            }
            None => false,
        };
        if emptied {
            idx.by_destination.remove(&link.destination);
        }

        true
    }

    async fn increment_clicks(&self, code: &str) -> bool {
        let key = canonical(code);
        let mut idx = self.indexes.write();

        let Some(link) = idx.by_code.get_mut(&key) else {
            return false;
        };

        // 计数与时间戳在同一临界区内一起推进，读者看不到撕裂状态
        let now = Utc::now();
        link.click_count += 1;
        link.last_accessed_at = Some(now);
        link.updated_at = now;

        true
    }

    async fn load_all(&self) -> Vec<ShortLink> {
        self.indexes.read().by_code.values().cloned().collect()
    }

    async fn count(&self) -> u64 {
        self.indexes.read().by_code.len() as u64
    }

    async fn get_backend_name(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn test_insert_and_get() {
        block_on(async {
            let store = MemoryStore::new();
            let link = store
                .insert_if_absent("MyCode1", "https://example.com")
                .await
                .unwrap();

            assert_eq!(link.code, "MyCode1");
            assert_eq!(link.destination, "https://example.com");
            assert_eq!(link.click_count, 0);
            assert!(link.last_accessed_at.is_none());
            assert_eq!(link.created_at, link.updated_at);

            let found = store.get_by_code("MyCode1").await.unwrap();
            assert_eq!(found.id, link.id);
        });
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        block_on(async {
            let store = MemoryStore::new();
            store
                .insert_if_absent("AbCdEf", "https://example.com")
                .await
                .unwrap();

            let found = store.get_by_code("ABCDEF").await.unwrap();
            // 展示形式保留原始大小写
            assert_eq!(found.code, "AbCdEf");
            assert!(store.get_by_code("abcdef").await.is_some());
        });
    }

    #[test]
    fn test_duplicate_rejected_across_cases() {
        block_on(async {
            let store = MemoryStore::new();
            store
                .insert_if_absent("promo", "https://a.example")
                .await
                .unwrap();

            let err = store
                .insert_if_absent("PROMO", "https://b.example")
                .await
                .unwrap_err();
            assert!(matches!(err, AdroitError::DuplicateCode(_)));

            // 失败的插入不留痕迹
            assert_eq!(store.count().await, 1);
            let kept = store.get_by_code("promo").await.unwrap();
            assert_eq!(kept.destination, "https://a.example");
        });
    }

    #[test]
    fn test_delete_maintains_both_indexes() {
        block_on(async {
            let store = MemoryStore::new();
            store
                .insert_if_absent("one", "https://example.com/page")
                .await
                .unwrap();
            store
                .insert_if_absent("two", "https://example.com/page")
                .await
                .unwrap();

            assert!(store.delete("ONE").await);
            assert!(!store.delete("one").await);

            assert!(store.get_by_code("one").await.is_none());
            let remaining = store.get_by_destination("https://example.com/page").await;
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].code, "two");

            // 最后一个码删除后目的地桶整体消失
            assert!(store.delete("two").await);
            assert!(
                store
                    .get_by_destination("https://example.com/page")
                    .await
                    .is_empty()
            );
        });
    }

    #[test]
    fn test_increment_clicks_updates_timestamps_together() {
        block_on(async {
            let store = MemoryStore::new();
            let created = store
                .insert_if_absent("hit", "https://example.com")
                .await
                .unwrap();

            assert!(store.increment_clicks("HIT").await);
            assert!(store.increment_clicks("hit").await);
            assert!(!store.increment_clicks("missing").await);

            let link = store.get_by_code("hit").await.unwrap();
            assert_eq!(link.click_count, 2);
            let accessed = link.last_accessed_at.unwrap();
            assert_eq!(link.updated_at, accessed);
            assert!(link.updated_at >= created.updated_at);
            assert_eq!(link.created_at, created.created_at);
        });
    }

    #[test]
    fn test_destination_index_is_exact_match() {
        block_on(async {
            let store = MemoryStore::new();
            store
                .insert_if_absent("slash", "https://example.com/")
                .await
                .unwrap();

            assert_eq!(
                store.get_by_destination("https://example.com/").await.len(),
                1
            );
            // 无尾斜杠视为不同目的地
            assert!(
                store
                    .get_by_destination("https://example.com")
                    .await
                    .is_empty()
            );
        });
    }

    #[test]
    fn test_load_all_is_a_snapshot() {
        block_on(async {
            let store = MemoryStore::new();
            store
                .insert_if_absent("aaaa", "https://a.example")
                .await
                .unwrap();
            store
                .insert_if_absent("bbbb", "https://b.example")
                .await
                .unwrap();

            let snapshot = store.load_all().await;
            assert_eq!(snapshot.len(), 2);

            // 快照与后续修改解耦
            store.delete("aaaa").await;
            assert_eq!(snapshot.len(), 2);
            assert_eq!(store.count().await, 1);
        });
    }

    #[test]
    fn test_recreate_after_delete_gets_fresh_identity() {
        block_on(async {
            let store = MemoryStore::new();
            let first = store
                .insert_if_absent("reuse", "https://example.com")
                .await
                .unwrap();
            store.increment_clicks("reuse").await;
            store.delete("reuse").await;

            let second = store
                .insert_if_absent("reuse", "https://example.com")
                .await
                .unwrap();
            assert_ne!(first.id, second.id);
            assert_eq!(second.click_count, 0);
        });
    }
}
