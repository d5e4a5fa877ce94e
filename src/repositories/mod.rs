//! 데이터 액세스 계층
//!
//! - [`users`] - 사용자 레코드 저장소 (MongoDB, 프로세스 내 구현)

pub mod users;
