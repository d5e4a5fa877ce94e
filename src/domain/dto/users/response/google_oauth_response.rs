//! Google OAuth 응답 DTO 모듈

use serde::Deserialize;

/// Google OAuth 2.0 토큰 교환 응답
///
/// Authorization Code를 Access Token으로 교환할 때 Google이 반환하는 데이터입니다.
/// userinfo 조회에는 `access_token`만 사용합니다.
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
}
