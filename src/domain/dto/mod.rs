//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들입니다.
//!
//! 모든 응답은 [`JsonResponse`] 봉투를 사용합니다.
//!
//! ```json
//! { "error": false, "message": "Logged in user a@b.com", "data": { "email": "a@b.com" } }
//! ```
//!
//! ```text
//! dto/
//! └── users/
//!     ├── request/    # 로그인, 회원가입, 코드, 비밀번호 재설정, OAuth 콜백
//!     └── response/   # 사용자 요약, Google 토큰 교환 응답
//! ```

pub mod users;

pub use users::*;

use serde::{Deserialize, Serialize};

/// 공통 응답 봉투
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> JsonResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }
}
