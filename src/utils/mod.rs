//! 공통 유틸리티 함수 모듈
//!
//! - [`random`] - jti/OAuth state 식별자, 6자리 인증 코드 생성
//!
//! ```rust,ignore
//! use crate::utils::random::{generate_code, generate_identifier};
//!
//! let jti = generate_identifier()?;   // "q3Xv...": 43자
//! let code = generate_code()?;        // "042517"
//! ```

pub mod random;
