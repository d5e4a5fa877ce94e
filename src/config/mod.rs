//! 설정 관리 모듈
//!
//! 모든 설정은 환경 변수에서 읽습니다. `main`에서 `PROFILE`에 맞는 `.env` 파일을
//! 먼저 로드한 뒤, 컴포지션 루트가 이 모듈의 접근자로 서비스들을 구성합니다.
//!
//! - [`auth_config`] - JWT 비밀키/수명, 리프레시 회전 정책, Google OAuth, 쿠키/리다이렉트
//! - [`data_config`] - 실행 환경, bcrypt cost, 서버 바인딩, 협력 서비스 주소

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
