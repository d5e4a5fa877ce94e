//! 세션 쿠키 생성
//!
//! | 쿠키 | HttpOnly | SameSite | 수명 |
//! |------|----------|----------|------|
//! | `access_token` | false | Lax | 액세스 토큰 만료까지 |
//! | `refresh_token` | true | Strict | 리프레시 토큰 만료까지 |
//!
//! 액세스 쿠키는 프런트엔드가 로그인 여부를 판단할 수 있도록 스크립트에서 읽을 수 있습니다.

use actix_web::cookie::time::{Duration as CookieDuration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

pub fn access_cookie(token: String, expires_at: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(ACCESS_COOKIE, token)
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(secure)
        .expires(OffsetDateTime::from_unix_timestamp(expires_at).ok())
        .finish()
}

pub fn refresh_cookie(token: String, expires_at: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .expires(OffsetDateTime::from_unix_timestamp(expires_at).ok())
        .finish()
}

/// 같은 이름의 쿠키를 즉시 만료시킵니다.
pub fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build(name, "")
        .path("/")
        .http_only(name == REFRESH_COOKIE)
        .secure(secure)
        .max_age(CookieDuration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .finish()
}
