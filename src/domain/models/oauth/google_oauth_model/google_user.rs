//! # Google OpenID Connect 사용자 정보
//!
//! `userinfo` 엔드포인트 응답 중 로컬 계정 매핑에 필요한 필드만 받습니다.

use serde::Deserialize;

/// Google userinfo 응답
///
/// `sub`는 Google 계정의 고유 식별자이며 로컬 레코드의 `google_id`로 저장됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String,

    pub email: String,

    #[serde(default)]
    pub given_name: String,

    #[serde(default)]
    pub family_name: String,
}
