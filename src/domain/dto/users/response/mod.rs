//! # 사용자 관련 응답 DTO 모듈
//!
//! 비밀번호 해시, Google id 같은 내부 필드는 응답에 포함하지 않습니다.

pub mod user_response;
pub mod google_oauth_response;

pub use user_response::{CreatedUserResponse, UserSummary};
pub use google_oauth_response::GoogleTokenResponse;
