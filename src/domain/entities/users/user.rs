//! User Entity Implementation
//!
//! 로컬 계정과 Google 연동 계정을 하나의 레코드로 표현합니다.
//! 비밀번호 해시가 없는 레코드는 연동 전용(federation-only) 계정이며,
//! 비밀번호 로그인과 비밀번호 재설정을 사용할 수 없습니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// `_id`는 숫자 시퀀스이며 `counters` 컬렉션에서 발급됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 레코드와 발급된 id로 엔티티를 만듭니다.
    pub fn from_new(id: i64, new_user: NewUser) -> Self {
        let now = DateTime::now();

        Self {
            id,
            google_id: new_user.google_id,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// 로컬 비밀번호가 설정되지 않은 연동 전용 계정인지 확인합니다.
    pub fn is_federation_only(&self) -> bool {
        self.password_hash.as_deref().map_or(true, str::is_empty)
    }

    /// 평문 비밀번호를 저장된 bcrypt 해시와 비교합니다.
    ///
    /// bcrypt 비교는 상수 시간으로 수행됩니다.
    /// 해시가 없거나 손상된 경우 `Ok(false)`가 아니라 에러를 반환하며,
    /// 호출자는 두 경우 모두 자격 증명 실패로 처리해야 합니다.
    pub fn password_matches(&self, plain: &str) -> Result<bool, bcrypt::BcryptError> {
        match self.password_hash.as_deref() {
            Some(hash) if !hash.is_empty() => bcrypt::verify(plain, hash),
            _ => Err(bcrypt::BcryptError::InvalidHash(String::new())),
        }
    }

    /// 수정 시각을 현재로 갱신합니다.
    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}

/// 삽입 전 사용자 레코드 (id 미발급)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub google_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: Option<String>,
}

impl NewUser {
    pub fn local(email: String, first_name: String, last_name: String, password_hash: String) -> Self {
        Self {
            google_id: None,
            email,
            first_name,
            last_name,
            password_hash: Some(password_hash),
        }
    }

    pub fn federated(google_id: String, email: String, first_name: String, last_name: String) -> Self {
        Self {
            google_id: Some(google_id),
            email,
            first_name,
            last_name,
            password_hash: None,
        }
    }
}
