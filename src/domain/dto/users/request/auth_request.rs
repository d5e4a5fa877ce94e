//! 인증 요청관련 DTO
//!
//! 인증을 요청하는 사용자들의 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 로컬 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 회원가입 요청 구조체
///
/// `verification_code`는 `/verify-code`로 메일 발송된 6자리 코드입니다.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 6, message = "비밀번호는 6자 이상이어야 합니다"))]
    pub password: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[validate(length(min = 1, message = "인증 코드가 필요합니다"))]
    pub verification_code: String,
}

/// 이메일 하나만 받는 요청 (인증 코드 발송, 비밀번호 찾기)
#[derive(Debug, Deserialize, Validate)]
pub struct EmailRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
}

/// 비밀번호 재설정 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "verification code is required"))]
    pub verification_code: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub new_password: String,
}

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 동의를 거부하면 `code`/`state` 대신 `error`가 전달됩니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub state: String,

    pub error: Option<String>,
    pub error_description: Option<String>,
}
