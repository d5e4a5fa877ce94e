//! # Redis 임시 저장소 구현
//!
//! `redis::aio::ConnectionManager` 하나를 공유하며, 연결이 끊기면 매니저가 재연결합니다.
//! 매니저는 `Clone`이 가벼우므로 작업마다 복제해서 사용합니다.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};

use super::{EphemeralStore, STORE_TIMEOUT};
use crate::errors::errors::{AppError, AppResult};

/// Redis 기반 [`EphemeralStore`]
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    timeout: Duration,
}

impl RedisStore {
    /// 주어진 URL로 연결하고 PING으로 서버 가용성을 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::StoreError` - URL 파싱 실패, 연결 실패, PING 실패 또는 타임아웃
    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = Client::open(redis_url)?;

        let connection = tokio::time::timeout(STORE_TIMEOUT, ConnectionManager::new(client))
            .await
            .map_err(|_| AppError::StoreError(format!("connect to {} timed out", redis_url)))??;

        let store = Self {
            connection,
            timeout: STORE_TIMEOUT,
        };

        let mut conn = store.connection.clone();
        store
            .bounded("PING", async move {
                redis::cmd("PING").query_async::<()>(&mut conn).await
            })
            .await?;

        log::info!("✅ Redis 연결 성공: {}", redis_url);

        Ok(store)
    }

    async fn bounded<T, F>(&self, op: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::StoreError(format!(
                "{} timed out after {:?}",
                op, self.timeout
            ))),
        }
    }
}

/// Redis `EX`는 초 단위이고 0을 허용하지 않으므로 올림 후 최소 1초로 맞춥니다.
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

#[async_trait]
impl EphemeralStore for RedisStore {
    async fn save_pair(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.connection.clone();
        self.bounded("SET", conn.set_ex::<_, _, ()>(key, value, ttl_seconds(ttl)))
            .await
    }

    async fn save_pair_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        // SET NX는 저장하지 않았을 때 nil을 돌려줍니다.
        let reply = self
            .bounded(
                "SET NX",
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("NX")
                    .arg("EX")
                    .arg(ttl_seconds(ttl))
                    .query_async::<Option<String>>(&mut conn),
            )
            .await?;
        Ok(reply.is_some())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        self.bounded("EXISTS", conn.exists::<_, bool>(key)).await
    }

    async fn get_value(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection.clone();
        self.bounded("GET", conn.get::<_, Option<String>>(key)).await
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let removed = self.bounded("DEL", conn.del::<_, i64>(key)).await?;
        Ok(removed > 0)
    }
}
