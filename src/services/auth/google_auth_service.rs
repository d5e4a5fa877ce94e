//! # Google OAuth 2.0 인증 서비스
//!
//! Authorization Code 플로우를 구동하고 Google 사용자 정보를 돌려줍니다.
//! 로컬 계정과의 매핑(식별자 → 이메일 → 신규 생성)은 `UserService`가 담당합니다.
//!
//! ## OAuth 2.0 Authorization Code Flow
//!
//! ```text
//! 클라이언트                       인증 서비스                                Google
//!     │ GET /authenticate/google       │                                        │
//!     ├───────────────────────────────►│ state 생성, store(6분)                 │
//!     │ 302 Location: auth_uri?state   │                                        │
//!     │◄───────────────────────────────┤                                        │
//!     │ 사용자 동의 ──────────────────────────────────────────────────────────────►│
//!     │ GET /oauth/google/callback?code&state                                   │
//!     ├───────────────────────────────►│ state 존재 확인 후 삭제 (1회용)        │
//!     │                                │ code → token (10초 제한) ─────────────►│
//!     │                                │ token → userinfo ─────────────────────►│
//!     │ 302 Location: REDIRECT_URL     │ 계정 매핑, 토큰 쿠키 발급              │
//!     │◄───────────────────────────────┤                                        │
//! ```
//!
//! ## 보안 특징
//!
//! - state는 32바이트 난수이며 저장소에 있을 때만 유효합니다.
//! - state 검증은 저장소 에러를 포함한 모든 실패에서 거부(fail closed)합니다.
//! - 검증에 성공한 state는 즉시 삭제되어 재사용할 수 없습니다.

use std::sync::Arc;
use std::time::Duration;

use crate::caching::EphemeralStore;
use crate::config::GoogleOAuthSettings;
use crate::domain::dto::users::response::GoogleTokenResponse;
use crate::domain::models::oauth::google_oauth_model::GoogleUserInfo;
use crate::errors::errors::{AppError, AppResult};
use crate::utils::random::generate_identifier;

/// OAuth state 유효 시간
pub const OAUTH_STATE_TTL: Duration = Duration::from_secs(6 * 60);

/// 토큰 교환과 사용자 정보 조회 각각의 제한 시간
pub const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

const STATE_KEY_PREFIX: &str = "oauth:google:state";
const SCOPES: &str = "openid email profile";

pub struct GoogleAuthService {
    store: Option<Arc<dyn EphemeralStore>>,
    settings: GoogleOAuthSettings,
    http: reqwest::Client,
}

impl GoogleAuthService {
    /// # Errors
    ///
    /// * `AppError::InternalError` - HTTP 클라이언트 구성 실패
    pub fn new(
        store: Option<Arc<dyn EphemeralStore>>,
        settings: GoogleOAuthSettings,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(EXCHANGE_TIMEOUT)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            store,
            settings,
            http,
        })
    }

    /// 로그인 URL을 생성하고 state를 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::UnsupportedError` - 저장소 없이 구동 중 (state를 보관할 수 없음)
    /// * `AppError::RandomGenerationError` - state 생성 실패
    /// * `AppError::StoreError` - state 저장 실패
    pub async fn login_url(&self) -> AppResult<String> {
        let store = self.store.as_ref().ok_or_else(|| {
            AppError::UnsupportedError("google login requires a session store".to_string())
        })?;

        let state = generate_identifier()?;
        store.save(&state_key(&state), OAUTH_STATE_TTL).await?;

        let params = [
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("scope", SCOPES),
            ("response_type", "code"),
            ("state", state.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}?{}", self.settings.auth_uri, query_string))
    }

    /// 콜백으로 돌아온 state를 검증하고 삭제합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidStateError` - state가 없거나, 이미 사용됐거나, 저장소 에러
    pub async fn validate_state(&self, state: &str) -> AppResult<()> {
        let Some(store) = &self.store else {
            return Err(AppError::InvalidStateError);
        };
        if state.is_empty() {
            return Err(AppError::InvalidStateError);
        }

        // 삭제 결과로 존재 확인과 1회 사용을 함께 판정합니다.
        match store.delete(&state_key(state)).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::InvalidStateError),
            Err(e) => {
                log::warn!("OAuth state 검증 중 저장소 에러: {}", e);
                Err(AppError::InvalidStateError)
            }
        }
    }

    /// Authorization code를 교환하고 Google 사용자 정보를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExchangeError` - 토큰 교환 또는 사용자 정보 조회가 실패하거나 2xx가 아님
    pub async fn fetch_user_info(&self, code: &str) -> AppResult<GoogleUserInfo> {
        let token = self.exchange_code_for_token(code).await?;
        self.get_user_info(&token.access_token).await
    }

    async fn exchange_code_for_token(&self, code: &str) -> AppResult<GoogleTokenResponse> {
        let params = [
            ("code", code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.settings.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExchangeError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExchangeError(format!(
                "Google 토큰 교환 실패 ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExchangeError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    async fn get_user_info(&self, access_token: &str) -> AppResult<GoogleUserInfo> {
        let response = self
            .http
            .get(&self.settings.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExchangeError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExchangeError(format!(
                "Google 사용자 정보 조회 실패: {}",
                response.status()
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExchangeError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }
}

fn state_key(state: &str) -> String {
    format!("{}:{}", STATE_KEY_PREFIX, state)
}
