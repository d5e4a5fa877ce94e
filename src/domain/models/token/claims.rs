//! JWT 클레임과 토큰 페어
//!
//! 액세스/리프레시 토큰의 클레임을 타입으로 고정합니다.
//! 디코딩 시 필드가 누락되면 역직렬화 단계에서 바로 실패합니다.

use serde::{Deserialize, Serialize};

/// 액세스 토큰 클레임
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// 사용자 id (문자열 인코딩)
    pub sub: String,
    /// 만료 시각 (Unix seconds)
    pub exp: i64,
}

/// 리프레시 토큰 클레임
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub exp: i64,
    /// 저장소 키로 사용되는 토큰 식별자
    pub jti: String,
}

/// 발급된 토큰 페어
///
/// 임시 저장소 없이 구동 중이면 `refresh_token`은 `None`입니다.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// 리프레시 결과
#[derive(Debug, Clone)]
pub struct RefreshedTokens {
    pub access_token: String,
    /// 회전 정책일 때 새로 발급된 리프레시 토큰과 만료 시각 (Unix seconds)
    pub rotated: Option<RotatedRefreshToken>,
}

#[derive(Debug, Clone)]
pub struct RotatedRefreshToken {
    pub token: String,
    pub expires_at: i64,
}
