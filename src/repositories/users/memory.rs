//! 프로세스 내 사용자 저장소
//!
//! 테스트와 로컬 개발용입니다. MongoDB 구현과 같은 유니크 제약을 지킵니다.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::user_repo::UserRepository;
use crate::domain::entities::users::{NewUser, User};
use crate::errors::errors::{AppError, AppResult};

#[derive(Default)]
struct Table {
    rows: Vec<User>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryUserRepository {
    table: Mutex<Table>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Table>> {
        self.table
            .lock()
            .map_err(|_| AppError::DatabaseError("memory repository lock poisoned".to_string()))
    }

    fn find<P>(&self, predicate: P) -> AppResult<Option<User>>
    where
        P: Fn(&User) -> bool,
    {
        Ok(self.lock()?.rows.iter().find(|u| predicate(u)).cloned())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find(|u| u.email == email)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.find(|u| u.id == id)
    }

    async fn get_by_google_id(&self, google_id: &str) -> AppResult<Option<User>> {
        self.find(|u| u.google_id.as_deref() == Some(google_id))
    }

    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let mut table = self.lock()?;

        let duplicate = table.rows.iter().any(|u| {
            u.email == new_user.email
                || (new_user.google_id.is_some() && u.google_id == new_user.google_id)
        });
        if duplicate {
            return Err(AppError::ConflictError("email already exists".to_string()));
        }

        table.last_id += 1;
        let user = User::from_new(table.last_id, new_user);
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut table = self.lock()?;
        let row = table
            .rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        row.email = user.email.clone();
        row.first_name = user.first_name.clone();
        row.last_name = user.last_name.clone();
        row.is_active = user.is_active;
        if user.google_id.is_some() {
            row.google_id = user.google_id.clone();
        }
        row.touch();
        Ok(())
    }

    async fn reset_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let mut table = self.lock()?;
        let row = table
            .rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        row.password_hash = Some(password_hash.to_string());
        row.touch();
        Ok(())
    }
}
