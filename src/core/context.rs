//! 요청 처리 컨텍스트
//!
//! ```text
//! main
//!  ├─ RedisStore (실패 시 None → 축소 모드)
//!  ├─ Database → MongoUserRepository
//!  ├─ HttpMailTransport, HttpAuditSink
//!  └─ AuthContext::build(...)
//!        ├─ UserService
//!        ├─ TokenService
//!        ├─ GoogleAuthService
//!        ├─ VerificationService
//!        └─ AuditDispatcher
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::caching::EphemeralStore;
use crate::config::{GoogleOAuthSettings, RefreshPolicy};
use crate::errors::errors::AppResult;
use crate::repositories::users::UserRepository;
use crate::services::audit::{AuditDispatcher, AuditSink};
use crate::services::auth::{CodePolicy, GoogleAuthService, TokenService, VerificationService};
use crate::services::mail::MailTransport;
use crate::services::users::UserService;

/// 세션 쿠키와 토큰 수명 설정
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub redirect_url: String,
    pub cookie_secure: bool,
}

impl SessionSettings {
    pub fn access_expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + chrono::Duration::seconds(self.access_ttl.as_secs() as i64)
    }

    pub fn refresh_expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + chrono::Duration::seconds(self.refresh_ttl.as_secs() as i64)
    }
}

/// 조립에 필요한 비밀 값과 정책
pub struct ContextConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub refresh_policy: RefreshPolicy,
    pub bcrypt_cost: u32,
    pub google: GoogleOAuthSettings,
    pub session: SessionSettings,
}

/// 핸들러가 공유하는 서비스 묶음
pub struct AuthContext {
    pub users: UserService,
    pub tokens: TokenService,
    pub google: GoogleAuthService,
    pub codes: VerificationService,
    pub audit: AuditDispatcher,
    pub settings: SessionSettings,
}

impl AuthContext {
    /// 서비스를 조립합니다. `store`가 `None`이면 축소 모드입니다.
    ///
    /// 감사 큐 워커를 띄우므로 tokio 런타임 안에서 호출해야 합니다.
    pub fn build(
        config: ContextConfig,
        store: Option<Arc<dyn EphemeralStore>>,
        repo: Arc<dyn UserRepository>,
        mailer: Arc<dyn MailTransport>,
        audit: AuditDispatcher,
    ) -> AppResult<Self> {
        if store.is_none() {
            log::warn!("세션 저장소 없이 구동합니다: 리프레시 토큰, 인증 코드, Google 로그인 비활성화");
        }

        Ok(Self {
            users: UserService::new(repo, config.bcrypt_cost),
            tokens: TokenService::new(
                store.clone(),
                &config.access_secret,
                &config.refresh_secret,
                config.refresh_policy,
            ),
            google: GoogleAuthService::new(store.clone(), config.google)?,
            codes: VerificationService::new(store, mailer, CodePolicy::default()),
            audit,
            settings: config.session,
        })
    }

    /// 감사 싱크로 큐 워커를 띄우고 컨텍스트를 조립합니다.
    pub fn with_audit_sink(
        config: ContextConfig,
        store: Option<Arc<dyn EphemeralStore>>,
        repo: Arc<dyn UserRepository>,
        mailer: Arc<dyn MailTransport>,
        sink: Arc<dyn AuditSink>,
        queue_capacity: usize,
    ) -> AppResult<Self> {
        let audit = AuditDispatcher::spawn(sink, queue_capacity);
        Self::build(config, store, repo, mailer, audit)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::caching::memory::MemoryStore;
    use crate::repositories::users::MemoryUserRepository;
    use crate::services::audit::audit_dispatcher::tests::RecordingSink;
    use crate::services::auth::google_auth_service::tests::settings;
    use crate::services::mail::mail_transport::tests::RecordingMailTransport;

    pub(crate) const TEST_ACCESS_SECRET: &str = "test-access-secret";
    pub(crate) const TEST_REFRESH_SECRET: &str = "test-refresh-secret";

    /// 테스트 더블로 채운 컨텍스트
    pub(crate) struct Harness {
        pub(crate) store: Arc<MemoryStore>,
        pub(crate) repo: Arc<MemoryUserRepository>,
        pub(crate) mailer: Arc<RecordingMailTransport>,
        pub(crate) audit: Arc<RecordingSink>,
    }

    pub(crate) fn config(provider_base: &str) -> ContextConfig {
        ContextConfig {
            access_secret: TEST_ACCESS_SECRET.to_string(),
            refresh_secret: TEST_REFRESH_SECRET.to_string(),
            refresh_policy: RefreshPolicy::Rotate,
            bcrypt_cost: 4,
            google: settings(provider_base),
            session: SessionSettings {
                access_ttl: Duration::from_secs(15 * 60),
                refresh_ttl: Duration::from_secs(7 * 24 * 3600),
                redirect_url: "http://app.local".to_string(),
                cookie_secure: false,
            },
        }
    }

    pub(crate) fn harness(provider_base: &str, with_store: bool) -> (AuthContext, Harness) {
        let harness = Harness {
            store: Arc::new(MemoryStore::new()),
            repo: Arc::new(MemoryUserRepository::new()),
            mailer: Arc::new(RecordingMailTransport::default()),
            audit: Arc::new(RecordingSink::default()),
        };

        let store: Option<Arc<dyn EphemeralStore>> = if with_store {
            Some(harness.store.clone() as Arc<dyn EphemeralStore>)
        } else {
            None
        };

        let context = AuthContext::with_audit_sink(
            config(provider_base),
            store,
            harness.repo.clone(),
            harness.mailer.clone(),
            harness.audit.clone(),
            8,
        )
        .unwrap();

        (context, harness)
    }

    #[actix_web::test]
    async fn test_session_expiry_offsets() {
        let settings = config("http://127.0.0.1:1").session;
        let now = Utc::now();

        assert_eq!((settings.access_expiry(now) - now).num_minutes(), 15);
        assert_eq!((settings.refresh_expiry(now) - now).num_days(), 7);
    }

    #[actix_web::test]
    async fn test_reduced_mode_still_issues_access_tokens() {
        let (context, _) = harness("http://127.0.0.1:1", false);
        let now = Utc::now();

        let pair = context
            .tokens
            .generate_token_pair(3, context.settings.access_expiry(now), context.settings.refresh_expiry(now))
            .await
            .unwrap();

        assert!(pair.refresh_token.is_none());
        assert_eq!(context.tokens.validate_access_token(&pair.access_token).unwrap(), 3);
    }
}
