//! API 라우트 설정 모듈
//!
//! | Method | Path | 핸들러 |
//! |--------|------|--------|
//! | POST | `/authenticate` | 이메일/비밀번호 로그인 |
//! | POST | `/register` | 로컬 가입 |
//! | POST | `/verify-code` | 가입 인증 코드 발송 |
//! | POST | `/forgot-password` | 재설정 코드 발송 |
//! | POST | `/reset-password` | 비밀번호 재설정 |
//! | GET | `/resource/profile` | 현재 사용자 프로필 |
//! | POST | `/logout` | 로그아웃 |
//! | GET | `/authenticate/google` | Google 로그인 시작 (302) |
//! | GET | `/oauth/google/callback` | Google 콜백 (302) |
//! | GET | `/ping` | 헬스체크 |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(context))
//!     .configure(configure_all_routes);
//! ```

use actix_web::web;

use crate::handlers;

/// 모든 라우트를 등록합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::ping);

    configure_local_routes(cfg);
    configure_google_routes(cfg);
}

fn configure_local_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::authenticate)
        .service(handlers::auth::register)
        .service(handlers::auth::verify_code)
        .service(handlers::auth::forgot_password)
        .service(handlers::auth::reset_password)
        .service(handlers::auth::profile)
        .service(handlers::auth::logout);
}

fn configure_google_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::google_login)
        .service(handlers::auth::google_callback);
}
