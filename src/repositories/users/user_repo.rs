//! # 사용자 리포지토리 구현
//!
//! 사용자 레코드의 조회, 생성, 수정을 담당합니다. 인증 흐름은 레코드를 삭제하지 않습니다.
//!
//! ## 특징
//!
//! - **숫자 id**: `counters` 컬렉션의 `{_id: "users", seq}` 문서를 `$inc`로 증가시켜 발급
//! - **유니크 제약**: `email` 유니크 인덱스, `google_id` sparse 유니크 인덱스
//! - **타임아웃**: 모든 호출은 [`DB_TIMEOUT`] 안에 끝나야 하며 초과 시 `DatabaseError`

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::users::{NewUser, User};
use crate::errors::errors::{AppError, AppResult};

/// 데이터베이스 호출 하나에 허용되는 최대 시간
pub const DB_TIMEOUT: Duration = Duration::from_secs(3);

const USERS_COLLECTION: &str = "users";
const COUNTERS_COLLECTION: &str = "counters";
const DUPLICATE_KEY: i32 = 11000;

/// 사용자 저장소
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn get_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn get_by_google_id(&self, google_id: &str) -> AppResult<Option<User>>;

    /// 새 id를 발급해 저장합니다.
    ///
    /// 이메일이나 Google id가 이미 있으면 `AppError::ConflictError`입니다.
    async fn insert(&self, new_user: NewUser) -> AppResult<User>;

    /// 프로필 필드(이름, Google id, 활성 상태)를 덮어씁니다. 레코드가 없으면 `NotFound`입니다.
    async fn update(&self, user: &User) -> AppResult<()>;

    /// 비밀번호 해시를 교체합니다. 레코드가 없으면 `NotFound`입니다.
    async fn reset_password(&self, id: i64, password_hash: &str) -> AppResult<()>;
}

/// MongoDB 기반 [`UserRepository`]
pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn users(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(USERS_COLLECTION)
    }

    fn counters(&self) -> Collection<Document> {
        self.db.get_database().collection::<Document>(COUNTERS_COLLECTION)
    }

    async fn bounded<T, F>(&self, op: &str, fut: F) -> AppResult<T>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(DB_TIMEOUT, fut).await {
            Ok(result) => result.map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("email already exists".to_string())
                } else {
                    AppError::DatabaseError(format!("{}: {}", op, e))
                }
            }),
            Err(_) => Err(AppError::DatabaseError(format!(
                "{} timed out after {:?}",
                op, DB_TIMEOUT
            ))),
        }
    }

    async fn next_id(&self) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .bounded(
                "next user id",
                self.counters()
                    .find_one_and_update(
                        doc! { "_id": USERS_COLLECTION },
                        doc! { "$inc": { "seq": 1_i64 } },
                    )
                    .with_options(options),
            )
            .await?
            .ok_or_else(|| AppError::DatabaseError("user id counter missing".to_string()))?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(format!("user id counter: {}", e)))
    }

    /// 유니크 인덱스를 생성합니다. 이미 있으면 아무 일도 하지 않습니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let google_id_index = IndexModel::builder()
            .keys(doc! { "google_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name("google_id_unique".to_string())
                    .build(),
            )
            .build();

        self.bounded(
            "create indexes",
            self.users().create_indexes([email_index, google_id_index]),
        )
        .await?;

        Ok(())
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.bounded("find user by email", self.users().find_one(doc! { "email": email }))
            .await
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.bounded("find user by id", self.users().find_one(doc! { "_id": id }))
            .await
    }

    async fn get_by_google_id(&self, google_id: &str) -> AppResult<Option<User>> {
        self.bounded(
            "find user by google id",
            self.users().find_one(doc! { "google_id": google_id }),
        )
        .await
    }

    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let id = self.next_id().await?;
        let user = User::from_new(id, new_user);

        self.bounded("insert user", self.users().insert_one(&user))
            .await?;

        log::info!("사용자 생성: id={} email={}", user.id, user.email);
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut set = doc! {
            "email": user.email.as_str(),
            "first_name": user.first_name.as_str(),
            "last_name": user.last_name.as_str(),
            "is_active": user.is_active,
            "updated_at": DateTime::now(),
        };
        if let Some(google_id) = &user.google_id {
            set.insert("google_id", google_id.as_str());
        }

        let result = self
            .bounded(
                "update user",
                self.users()
                    .update_one(doc! { "_id": user.id }, doc! { "$set": set }),
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("user not found".to_string()));
        }
        Ok(())
    }

    async fn reset_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let result = self
            .bounded(
                "reset password",
                self.users().update_one(
                    doc! { "_id": id },
                    doc! { "$set": { "password_hash": password_hash, "updated_at": DateTime::now() } },
                ),
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("user not found".to_string()));
        }
        Ok(())
    }
}
