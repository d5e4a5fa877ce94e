//! 프로세스 내 임시 저장소
//!
//! 테스트와 Redis 없는 로컬 개발에서 사용합니다. 만료는 읽기 시점에 판정합니다.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::EphemeralStore;
use crate::errors::errors::{AppError, AppResult};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// `HashMap` 기반 [`EphemeralStore`]
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::StoreError("memory store lock poisoned".to_string()))
    }

    /// 만료된 항목을 제거한 뒤 남은 값을 돌려줍니다.
    fn live_value(entries: &mut HashMap<String, Entry>, key: &str) -> Option<String> {
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }
}

#[async_trait]
impl EphemeralStore for MemoryStore {
    async fn save_pair(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut entries = self.lock()?;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn save_pair_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let mut entries = self.lock()?;
        if Self::live_value(&mut entries, key).is_some() {
            return Ok(false);
        }
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(true)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut entries = self.lock()?;
        Ok(Self::live_value(&mut entries, key).is_some())
    }

    async fn get_value(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self.lock()?;
        Ok(Self::live_value(&mut entries, key))
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let mut entries = self.lock()?;
        let was_live = Self::live_value(&mut entries, key).is_some();
        entries.remove(key);
        Ok(was_live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_save_marks_presence() {
        let store = MemoryStore::new();
        store.save("jti-1", Duration::from_secs(60)).await.unwrap();

        assert!(store.exists("jti-1").await.unwrap());
        assert_eq!(store.get_value("jti-1").await.unwrap().as_deref(), Some("1"));
        assert!(!store.exists("jti-2").await.unwrap());
    }

    #[actix_web::test]
    async fn test_empty_value_is_distinct_from_missing() {
        let store = MemoryStore::new();
        store.save_pair("k", "", Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get_value("k").await.unwrap(), Some(String::new()));
        assert_eq!(store.get_value("missing").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_entries_expire() {
        let store = MemoryStore::new();
        store
            .save_pair("code", "123456", Duration::from_millis(30))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(!store.exists("code").await.unwrap());
        assert_eq!(store.get_value("code").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_save_if_absent_keeps_live_value() {
        let store = MemoryStore::new();

        assert!(store.save_pair_if_absent("code", "111111", Duration::from_millis(30)).await.unwrap());
        assert!(!store.save_pair_if_absent("code", "222222", Duration::from_secs(60)).await.unwrap());
        assert_eq!(store.get_value("code").await.unwrap().as_deref(), Some("111111"));

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(store.save_pair_if_absent("code", "333333", Duration::from_secs(60)).await.unwrap());
        assert_eq!(store.get_value("code").await.unwrap().as_deref(), Some("333333"));
    }

    #[actix_web::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.save("jti", Duration::from_secs(60)).await.unwrap();

        assert!(store.delete("jti").await.unwrap());
        assert!(!store.delete("jti").await.unwrap());
        assert!(!store.exists("jti").await.unwrap());
    }
}
