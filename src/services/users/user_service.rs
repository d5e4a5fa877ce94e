//! # 사용자 계정 서비스 구현
//!
//! 로컬 계정(이메일 + 비밀번호)과 Google 연동 계정을 하나의 사용자 레코드로 관리합니다.
//!
//! ## 인증 규칙
//!
//! - 사용자 없음, 연동 전용 계정, 비활성 계정, 비밀번호 불일치, 해시 손상은 모두
//!   같은 `AppError::InvalidCredentials`로 응답합니다.
//! - 비밀번호 비교는 bcrypt의 상수 시간 비교를 사용합니다.
//!
//! ## Google 계정 연결 순서
//!
//! ```text
//! google_id 조회 ──있음──▶ 기존 사용자
//!      │ 없음
//!      ▼
//! email 조회 ──있음──▶ google_id를 붙여 갱신 (같은 레코드 유지)
//!      │ 없음
//!      ▼
//! 새 연동 전용 사용자 생성
//! ```

use std::sync::Arc;

use crate::domain::entities::users::{NewUser, User};
use crate::domain::models::oauth::google_oauth_model::GoogleUserInfo;
use crate::errors::errors::{AppError, AppResult};
use crate::repositories::users::UserRepository;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }

    /// 이메일과 비밀번호로 사용자를 인증합니다.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if user.is_federation_only() {
            log::debug!("연동 전용 계정의 비밀번호 로그인 시도: id={}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            log::debug!("비활성 계정 로그인 시도: id={}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        match user.password_matches(password) {
            Ok(true) => Ok(user),
            Ok(false) => Err(AppError::InvalidCredentials),
            Err(e) => {
                log::warn!("비밀번호 해시 검증 실패: id={} ({})", user.id, e);
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// 이메일이 이미 사용 중인지 확인합니다.
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.repo.get_by_email(email).await?.is_some())
    }

    /// 로컬 계정을 생성합니다. 이메일이 이미 있으면 `ConflictError`입니다.
    pub async fn register_local(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<User> {
        if self.email_exists(email).await? {
            return Err(AppError::ConflictError("email already exists".to_string()));
        }

        let password_hash = self.hash_password(password)?;
        self.repo
            .insert(NewUser::local(
                email.to_string(),
                first_name.to_string(),
                last_name.to_string(),
                password_hash,
            ))
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<User> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.repo.get_by_email(email).await
    }

    /// 새 비밀번호를 해시하여 저장합니다. 사용자가 없으면 `NotFound`입니다.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> AppResult<()> {
        let user = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        let password_hash = self.hash_password(new_password)?;
        self.repo.reset_password(user.id, &password_hash).await?;

        log::info!("비밀번호 재설정 완료: id={}", user.id);
        Ok(())
    }

    /// Google 사용자 정보를 로컬 사용자 레코드로 연결합니다.
    pub async fn resolve_google_identity(&self, info: &GoogleUserInfo) -> AppResult<User> {
        if let Some(user) = self.repo.get_by_google_id(&info.sub).await? {
            return Ok(user);
        }

        if let Some(mut user) = self.repo.get_by_email(&info.email).await? {
            user.google_id = Some(info.sub.clone());
            user.touch();
            self.repo.update(&user).await?;
            log::info!("기존 계정에 Google 연결: id={}", user.id);
            return Ok(user);
        }

        let user = self
            .repo
            .insert(NewUser::federated(
                info.sub.clone(),
                info.email.clone(),
                info.given_name.clone(),
                info.family_name.clone(),
            ))
            .await?;

        log::info!("Google 계정으로 사용자 생성: id={}", user.id);
        Ok(user)
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(bcrypt::hash(password, self.bcrypt_cost)?)
    }
}
