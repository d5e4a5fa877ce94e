//! # OAuth Domain Models Module
//!
//! 외부 ID 제공자와의 Authorization Code 플로우에서 주고받는 모델입니다.
//! 현재는 Google만 지원합니다.
//!
//! ```text
//! oauth/
//! └── google_oauth_model/
//!     └── google_user.rs   ← userinfo 응답
//! ```

pub mod google_oauth_model;
