//! 인증/재설정 코드 서비스
//!
//! 6자리 숫자 코드를 발급해 메일로 보내고, 제출된 코드를 1회에 한해 확인합니다.
//!
//! | 용도 | 저장 키 | 유효 시간 |
//! |------|---------|-----------|
//! | 회원가입 인증 | `mail:verification:{email}` | 5분 |
//! | 비밀번호 재설정 | `mail:password_reset:{email}` | 10분 |
//!
//! 코드가 저장소에 남아 있는 동안은 같은 이메일/용도로 재발급하지 않습니다.
//! 만료 시점까지 고정되는 창(window) 단위 제한이며 슬라이딩 윈도우가 아닙니다.
//!
//! 코드가 없을 때의 결과는 용도마다 다릅니다.
//! - 회원가입 인증: `Ok(false)` (인증 실패)
//! - 비밀번호 재설정: `Err(AppError::ExpiredError)`

use std::sync::Arc;
use std::time::Duration;

use crate::caching::EphemeralStore;
use crate::errors::errors::{AppError, AppResult};
use crate::services::mail::MailTransport;
use crate::utils::random::generate_code;

/// 코드 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    SignupVerification,
    PasswordReset,
}

impl CodePurpose {
    fn key_prefix(&self) -> &'static str {
        match self {
            CodePurpose::SignupVerification => "mail:verification",
            CodePurpose::PasswordReset => "mail:password_reset",
        }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            CodePurpose::SignupVerification => "DWELL Verification Code",
            CodePurpose::PasswordReset => "DWELL Password Reset Code",
        }
    }

    fn body(&self, code: &str) -> String {
        match self {
            CodePurpose::SignupVerification => format!("Your verification code is: {}", code),
            CodePurpose::PasswordReset => format!("Your password reset code is: {}", code),
        }
    }

    pub fn store_key(&self, email: &str) -> String {
        format!("{}:{}", self.key_prefix(), email)
    }
}

/// 용도별 코드 유효 시간
#[derive(Debug, Clone, Copy)]
pub struct CodePolicy {
    pub verification_ttl: Duration,
    pub reset_ttl: Duration,
}

impl Default for CodePolicy {
    fn default() -> Self {
        Self {
            verification_ttl: Duration::from_secs(5 * 60),
            reset_ttl: Duration::from_secs(10 * 60),
        }
    }
}

impl CodePolicy {
    fn ttl(&self, purpose: CodePurpose) -> Duration {
        match purpose {
            CodePurpose::SignupVerification => self.verification_ttl,
            CodePurpose::PasswordReset => self.reset_ttl,
        }
    }
}

pub struct VerificationService {
    store: Option<Arc<dyn EphemeralStore>>,
    mailer: Arc<dyn MailTransport>,
    policy: CodePolicy,
}

impl VerificationService {
    pub fn new(
        store: Option<Arc<dyn EphemeralStore>>,
        mailer: Arc<dyn MailTransport>,
        policy: CodePolicy,
    ) -> Self {
        Self {
            store,
            mailer,
            policy,
        }
    }

    fn store(&self) -> AppResult<&Arc<dyn EphemeralStore>> {
        self.store.as_ref().ok_or_else(|| {
            AppError::UnsupportedError("verification codes require a session store".to_string())
        })
    }

    /// 코드를 발급해 메일로 보냅니다.
    ///
    /// 메일 서비스가 거부하면 저장한 코드를 지워 바로 다시 요청할 수 있게 합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::RateLimitError` - 이전 코드가 아직 유효함
    /// * `AppError::DeliveryError` - 메일 서비스 거부
    /// * `AppError::StoreError` / `AppError::RandomGenerationError`
    /// * `AppError::UnsupportedError` - 저장소 없이 구동 중
    pub async fn send_code(&self, email: &str, purpose: CodePurpose) -> AppResult<()> {
        let store = self.store()?;
        let key = purpose.store_key(email);

        let code = generate_code()?;
        if !store
            .save_pair_if_absent(&key, &code, self.policy.ttl(purpose))
            .await?
        {
            return Err(AppError::RateLimitError);
        }

        if let Err(e) = self
            .mailer
            .deliver(email, purpose.subject(), &purpose.body(&code))
            .await
        {
            if let Err(cleanup) = store.delete(&key).await {
                log::warn!("전송 실패한 코드 정리 실패 ({}): {}", key, cleanup);
            }
            return Err(e);
        }

        Ok(())
    }

    /// 제출된 코드를 확인합니다.
    ///
    /// 일치하면 코드를 삭제하고 `true`를 반환합니다.
    /// 불일치하면 코드를 유지한 채 `false`를 반환하므로 만료 전까지 다시 시도할 수 있습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExpiredError` - 비밀번호 재설정 용도이고 저장된 코드가 없음
    /// * `AppError::StoreError` / `AppError::UnsupportedError`
    pub async fn verify_code(
        &self,
        email: &str,
        purpose: CodePurpose,
        submitted: &str,
    ) -> AppResult<bool> {
        let store = self.store()?;
        let key = purpose.store_key(email);

        let Some(stored) = store.get_value(&key).await? else {
            return match purpose {
                CodePurpose::SignupVerification => Ok(false),
                CodePurpose::PasswordReset => Err(AppError::ExpiredError),
            };
        };

        if stored != submitted {
            return Ok(false);
        }

        // 같은 코드를 동시에 제출하면 DEL에 성공한 요청만 통과합니다.
        store.delete(&key).await
    }
}
