//! 임시 키-값 저장소 계층
//!
//! 리프레시 토큰 jti, OAuth state, 인증/재설정 코드처럼 TTL이 있는 세션 상태를 보관합니다.
//! 영구 데이터는 이곳에 두지 않습니다.
//!
//! # 구현체
//!
//! - [`redis::RedisStore`] - 운영용. `SET EX`/`SET NX EX`/`EXISTS`/`GET`/`DEL`
//! - [`memory::MemoryStore`] - 테스트 및 로컬 개발용 프로세스 내 저장소
//!
//! 모든 작업은 [`STORE_TIMEOUT`] 안에 끝나야 하며, 타임아웃과 연결 실패는
//! `AppError::StoreError`로 호출자에게 전달됩니다. 재시도는 하지 않습니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use crate::caching::EphemeralStore;
//!
//! store.save(&jti, Duration::from_secs(7 * 24 * 3600)).await?;
//! assert!(store.exists(&jti).await?);
//!
//! store.save_pair("mail:verification:a@b.com", "042517", Duration::from_secs(300)).await?;
//! let code: Option<String> = store.get_value("mail:verification:a@b.com").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod memory;
pub mod redis;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::errors::AppResult;

/// 저장소 작업 하나에 허용되는 최대 시간
pub const STORE_TIMEOUT: Duration = Duration::from_secs(2);

/// 존재 여부만 의미가 있는 키에 저장하는 값
pub const PRESENCE_VALUE: &str = "1";

/// TTL 기반 임시 저장소
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    /// 존재 표시용 값으로 키를 저장합니다.
    async fn save(&self, key: &str, ttl: Duration) -> AppResult<()> {
        self.save_pair(key, PRESENCE_VALUE, ttl).await
    }

    /// 임의의 문자열 값을 TTL과 함께 저장합니다. 기존 값은 덮어씁니다.
    async fn save_pair(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// 키가 없을 때만 저장합니다. 이번 호출이 저장했으면 `true`, 이미 있으면 `false`
    async fn save_pair_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// 키가 존재하고 만료되지 않았으면 `true`
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// 저장된 값. 키가 없으면 `None`이며 빈 문자열 값과 구분됩니다.
    async fn get_value(&self, key: &str) -> AppResult<Option<String>>;

    /// 키를 삭제합니다. 멱등이며, 이번 호출이 실제로 키를 지웠으면 `true`를 반환합니다.
    async fn delete(&self, key: &str) -> AppResult<bool>;
}
