//! JWT 토큰 관리 서비스 구현
//!
//! 액세스/리프레시 토큰 페어의 발급, 검증, 갱신, 폐기를 담당합니다.
//!
//! ```text
//! generate_token_pair ──► jti 생성 ──► store.save(jti, 남은 수명) ──► 두 토큰 서명
//!
//! refresh(RT) ──► 서명/만료 검증 ──► jti 확인 ──┬─ Reuse : jti 존재 확인 ──► 새 AT
//!                                              └─ Rotate: DEL jti 성공 ──► 새 jti 저장 ──► 새 AT + 새 RT
//! ```
//!
//! - 액세스 토큰은 저장하지 않으며 만료 전에는 폐기할 수 없습니다.
//! - 리프레시 토큰은 서명/만료 검증을 통과하고 jti가 저장소에 있을 때만 유효합니다.
//! - 저장소 없이 구동 중이면 액세스 토큰만 발급하고, 리프레시는 `UnsupportedError`입니다.
//! - 만료 시각은 서명 시점의 절대 Unix 시간이며 시계 오차 허용(leeway)은 0입니다.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::caching::EphemeralStore;
use crate::config::RefreshPolicy;
use crate::domain::models::token::{
    AccessClaims, RefreshClaims, RefreshedTokens, RotatedRefreshToken, TokenPair,
};
use crate::errors::errors::{AppError, AppResult};
use crate::utils::random::generate_identifier;

pub struct TokenService {
    store: Option<Arc<dyn EphemeralStore>>,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    policy: RefreshPolicy,
}

impl TokenService {
    /// 토큰 서비스를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `store` - jti 저장소. `None`이면 축소 모드(리프레시 토큰 미발급)로 동작
    /// * `access_secret` / `refresh_secret` - 종류별 HS256 서명 키
    /// * `policy` - 리프레시 성공 시 jti 처리 정책
    pub fn new(
        store: Option<Arc<dyn EphemeralStore>>,
        access_secret: &str,
        refresh_secret: &str,
        policy: RefreshPolicy,
    ) -> Self {
        Self {
            store,
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            policy,
        }
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// 사용자에게 토큰 페어를 발급합니다.
    ///
    /// jti는 리프레시 만료까지 남은 시간을 TTL로 저장소에 기록됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::StoreError` - jti 저장 실패
    /// * `AppError::RandomGenerationError` - jti 생성 실패
    /// * `AppError::SigningError` - 서명 실패
    pub async fn generate_token_pair(
        &self,
        user_id: i64,
        access_expiry: DateTime<Utc>,
        refresh_expiry: DateTime<Utc>,
    ) -> AppResult<TokenPair> {
        let subject = user_id.to_string();

        let jti = match &self.store {
            Some(store) => {
                let jti = generate_identifier()?;
                store
                    .save(&jti, remaining_until(refresh_expiry.timestamp()))
                    .await?;
                Some(jti)
            }
            None => None,
        };

        let access_token = self.sign_access(&subject, access_expiry.timestamp())?;
        let refresh_token = jti
            .map(|jti| self.sign_refresh(&subject, refresh_expiry.timestamp(), jti))
            .transpose()?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// 리프레시 토큰으로 새 액세스 토큰을 발급합니다.
    ///
    /// 회전 정책이면 기존 jti를 삭제하고 같은 만료 시각의 새 리프레시 토큰도 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::UnsupportedError` - 저장소 없이 구동 중
    /// * `AppError::InvalidTokenError` - 서명 불일치, 형식 오류, 만료, 빈 jti 또는 잘못된 subject
    /// * `AppError::RevokedError` - jti가 저장소에 없음 (이미 사용/회전/폐기됨)
    /// * `AppError::StoreError` - 저장소 에러
    pub async fn refresh(
        &self,
        refresh_token: &str,
        new_access_expiry: DateTime<Utc>,
    ) -> AppResult<RefreshedTokens> {
        let store = self.store.as_ref().ok_or_else(|| {
            AppError::UnsupportedError("refresh tokens require a session store".to_string())
        })?;

        let claims = self.decode_refresh(refresh_token, true)?;
        if claims.jti.is_empty() {
            return Err(AppError::InvalidTokenError("missing jti".to_string()));
        }
        parse_subject(&claims.sub)?;

        let rotated = match self.policy {
            RefreshPolicy::Reuse => {
                if !store.exists(&claims.jti).await? {
                    return Err(AppError::RevokedError);
                }
                None
            }
            RefreshPolicy::Rotate => {
                // DEL은 원자적이므로 동시 요청 중 하나만 true를 받습니다.
                if !store.delete(&claims.jti).await? {
                    return Err(AppError::RevokedError);
                }

                let jti = generate_identifier()?;
                store.save(&jti, remaining_until(claims.exp)).await?;

                Some(RotatedRefreshToken {
                    token: self.sign_refresh(&claims.sub, claims.exp, jti)?,
                    expires_at: claims.exp,
                })
            }
        };

        let access_token = self.sign_access(&claims.sub, new_access_expiry.timestamp())?;

        Ok(RefreshedTokens {
            access_token,
            rotated,
        })
    }

    /// 액세스 토큰을 검증하고 사용자 id를 반환합니다.
    pub fn validate_access_token(&self, access_token: &str) -> AppResult<i64> {
        let claims = decode::<AccessClaims>(access_token, &self.access_decoding, &validation(true))
            .map(|data| data.claims)
            .map_err(|e| AppError::InvalidTokenError(e.to_string()))?;

        parse_subject(&claims.sub)
    }

    /// 리프레시 토큰의 jti를 저장소에서 삭제합니다. (로그아웃)
    ///
    /// 만료 여부와 무관하게 서명이 맞으면 jti를 삭제합니다.
    /// 해독할 수 없는 토큰이나 저장소 없는 구동에서는 지울 상태가 없으므로 `Ok(false)`입니다.
    pub async fn revoke(&self, refresh_token: &str) -> AppResult<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };

        match self.decode_refresh(refresh_token, false) {
            Ok(claims) if !claims.jti.is_empty() => store.delete(&claims.jti).await,
            Ok(_) => Ok(false),
            Err(e) => {
                log::debug!("로그아웃 토큰 무시: {}", e);
                Ok(false)
            }
        }
    }

    fn decode_refresh(&self, token: &str, validate_exp: bool) -> AppResult<RefreshClaims> {
        decode::<RefreshClaims>(token, &self.refresh_decoding, &validation(validate_exp))
            .map(|data| data.claims)
            .map_err(|e| AppError::InvalidTokenError(e.to_string()))
    }

    fn sign_access(&self, subject: &str, exp: i64) -> AppResult<String> {
        sign(
            &AccessClaims {
                sub: subject.to_string(),
                exp,
            },
            &self.access_encoding,
        )
    }

    fn sign_refresh(&self, subject: &str, exp: i64, jti: String) -> AppResult<String> {
        sign(
            &RefreshClaims {
                sub: subject.to_string(),
                exp,
                jti,
            },
            &self.refresh_encoding,
        )
    }
}

fn sign<T: Serialize>(claims: &T, key: &EncodingKey) -> AppResult<String> {
    encode(&Header::new(Algorithm::HS256), claims, key)
        .map_err(|e| AppError::SigningError(e.to_string()))
}

fn validation(validate_exp: bool) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = validate_exp;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

fn parse_subject(subject: &str) -> AppResult<i64> {
    subject
        .parse::<i64>()
        .map_err(|_| AppError::InvalidTokenError("invalid subject".to_string()))
}

/// 만료 시각까지 남은 시간. 이미 지났으면 0입니다.
fn remaining_until(expires_at: i64) -> Duration {
    let secs = expires_at - Utc::now().timestamp();
    Duration::from_secs(u64::try_from(secs).unwrap_or(0))
}
