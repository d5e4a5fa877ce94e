//! 인증 HTTP 핸들러
//!
//! 모든 핸들러는 `web::Data<AuthContext>`로 서비스를 주입받고,
//! 실패는 `AppError`로 반환하여 공통 JSON 에러 응답으로 변환됩니다.
//!
//! 세션은 쿠키로만 전달됩니다. 토큰은 응답 본문에 포함하지 않습니다.

use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse, HttpResponseBuilder};
use chrono::Utc;
use validator::Validate;

use super::cookies::{
    access_cookie, expired_cookie, refresh_cookie, ACCESS_COOKIE, REFRESH_COOKIE,
};
use crate::core::AuthContext;
use crate::domain::dto::users::{
    CreatedUserResponse, EmailRequest, LoginRequest, OAuthCallbackQuery, RegisterRequest,
    ResetPasswordRequest, UserSummary,
};
use crate::domain::dto::JsonResponse;
use crate::errors::errors::{AppError, AppResult};
use crate::services::auth::CodePurpose;

/// 토큰 페어를 발급하고 두 쿠키를 응답에 붙입니다.
///
/// 저장소 없이 구동 중이면 액세스 쿠키만 붙습니다.
async fn issue_session(
    ctx: &AuthContext,
    response: &mut HttpResponseBuilder,
    user_id: i64,
) -> AppResult<()> {
    let now = Utc::now();
    let access_expiry = ctx.settings.access_expiry(now);
    let refresh_expiry = ctx.settings.refresh_expiry(now);

    let pair = ctx
        .tokens
        .generate_token_pair(user_id, access_expiry, refresh_expiry)
        .await?;

    let secure = ctx.settings.cookie_secure;
    response.cookie(access_cookie(pair.access_token, access_expiry.timestamp(), secure));
    if let Some(refresh_token) = pair.refresh_token {
        response.cookie(refresh_cookie(refresh_token, refresh_expiry.timestamp(), secure));
    }
    Ok(())
}

#[post("/authenticate")]
pub async fn authenticate(
    ctx: web::Data<AuthContext>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = ctx
        .users
        .authenticate(&payload.email, &payload.password)
        .await?;

    let mut response = HttpResponse::Accepted();
    issue_session(&ctx, &mut response, user.id).await?;

    log::info!("로그인 성공: id={}", user.id);
    ctx.audit
        .dispatch("authentication", format!("{} logged in", user.email));

    Ok(response.json(JsonResponse::success(
        format!("Logged in user {}", user.email),
        UserSummary::from(&user),
    )))
}

#[post("/register")]
pub async fn register(
    ctx: web::Data<AuthContext>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if ctx.users.email_exists(&payload.email).await? {
        return Err(AppError::ConflictError("email already exists".to_string()));
    }

    let verified = ctx
        .codes
        .verify_code(
            &payload.email,
            CodePurpose::SignupVerification,
            &payload.verification_code,
        )
        .await?;
    if !verified {
        return Err(AppError::InvalidCodeError);
    }

    let user = ctx
        .users
        .register_local(
            &payload.email,
            &payload.password,
            &payload.first_name,
            &payload.last_name,
        )
        .await?;

    let mut response = HttpResponse::Created();
    issue_session(&ctx, &mut response, user.id).await?;

    ctx.audit
        .dispatch("registration", format!("{} registered", user.email));

    Ok(response.json(JsonResponse::success(
        format!("Registered user {}", user.email),
        CreatedUserResponse::from(&user),
    )))
}

/// 가입 인증 코드를 메일로 보냅니다.
#[post("/verify-code")]
pub async fn verify_code(
    ctx: web::Data<AuthContext>,
    payload: web::Json<EmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if ctx.users.email_exists(&payload.email).await? {
        return Err(AppError::ConflictError("email already exists".to_string()));
    }

    ctx.codes
        .send_code(&payload.email, CodePurpose::SignupVerification)
        .await?;

    Ok(HttpResponse::Created().json(JsonResponse::<()>::message(format!(
        "{} sent successfully!",
        payload.email
    ))))
}

/// 비밀번호 재설정 코드를 메일로 보냅니다.
///
/// 가입되지 않은 이메일에도 같은 성공 메시지로 응답하여 계정 존재 여부를 숨깁니다.
#[post("/forgot-password")]
pub async fn forgot_password(
    ctx: web::Data<AuthContext>,
    payload: web::Json<EmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let Some(user) = ctx.users.find_by_email(&payload.email).await? else {
        log::debug!("비밀번호 재설정 요청: 미가입 이메일");
        return Ok(HttpResponse::Ok().json(JsonResponse::<()>::message(
            "If an account exists with this email, a reset code has been sent",
        )));
    };

    if user.is_federation_only() {
        return Err(AppError::ValidationError(
            "this account uses Google sign-in. Please login with Google".to_string(),
        ));
    }

    ctx.codes
        .send_code(&user.email, CodePurpose::PasswordReset)
        .await?;

    ctx.audit.dispatch(
        "password-reset-request",
        format!("{} requested a password reset", user.email),
    );

    Ok(HttpResponse::Ok().json(JsonResponse::<()>::message(
        "Password reset code sent successfully",
    )))
}

#[post("/reset-password")]
pub async fn reset_password(
    ctx: web::Data<AuthContext>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let verified = ctx
        .codes
        .verify_code(
            &payload.email,
            CodePurpose::PasswordReset,
            &payload.verification_code,
        )
        .await?;
    if !verified {
        return Err(AppError::InvalidCodeError);
    }

    ctx.users
        .reset_password(&payload.email, &payload.new_password)
        .await?;

    ctx.audit.dispatch(
        "password-reset-complete",
        format!("{} reset their password", payload.email),
    );

    Ok(HttpResponse::Ok().json(JsonResponse::<()>::message("Password reset successfully")))
}

/// 현재 사용자 프로필
///
/// 액세스 쿠키가 없거나 무효하면 리프레시 쿠키로 새 액세스 토큰을 받아 쿠키를 갱신합니다.
/// 회전 정책이면 리프레시 쿠키도 새 토큰으로 교체됩니다.
#[get("/resource/profile")]
pub async fn profile(
    ctx: web::Data<AuthContext>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let access_user = req
        .cookie(ACCESS_COOKIE)
        .and_then(|cookie| ctx.tokens.validate_access_token(cookie.value()).ok());

    let mut response = HttpResponse::Ok();

    let user_id = match access_user {
        Some(user_id) => user_id,
        None => {
            let refresh = req
                .cookie(REFRESH_COOKIE)
                .ok_or_else(|| AppError::AuthenticationError("unauthenticated".to_string()))?;

            let access_expiry = ctx.settings.access_expiry(Utc::now());
            let refreshed = ctx
                .tokens
                .refresh(refresh.value(), access_expiry)
                .await
                .map_err(|e| match e {
                    AppError::InvalidTokenError(_) | AppError::RevokedError => {
                        log::debug!("리프레시 실패: {}", e);
                        AppError::AuthenticationError("refresh token invalid".to_string())
                    }
                    other => other,
                })?;

            let user_id = ctx.tokens.validate_access_token(&refreshed.access_token)?;

            let secure = ctx.settings.cookie_secure;
            response.cookie(access_cookie(
                refreshed.access_token,
                access_expiry.timestamp(),
                secure,
            ));
            if let Some(rotated) = refreshed.rotated {
                response.cookie(refresh_cookie(rotated.token, rotated.expires_at, secure));
            }
            user_id
        }
    };

    let user = ctx.users.find_by_id(user_id).await?;

    Ok(response.json(JsonResponse::success(
        "Profile fetched successfully",
        UserSummary::from(&user),
    )))
}

/// 두 쿠키를 만료시키고 리프레시 토큰의 jti를 폐기합니다.
#[post("/logout")]
pub async fn logout(
    ctx: web::Data<AuthContext>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    if let Some(refresh) = req.cookie(REFRESH_COOKIE) {
        if ctx.tokens.revoke(refresh.value()).await? {
            log::debug!("리프레시 토큰 폐기");
        }
    }

    let secure = ctx.settings.cookie_secure;
    Ok(HttpResponse::Ok()
        .cookie(expired_cookie(ACCESS_COOKIE, secure))
        .cookie(expired_cookie(REFRESH_COOKIE, secure))
        .json(JsonResponse::<()>::message("Logged out successfully")))
}

#[get("/authenticate/google")]
pub async fn google_login(ctx: web::Data<AuthContext>) -> Result<HttpResponse, AppError> {
    let url = ctx.google.login_url().await?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .finish())
}

#[get("/oauth/google/callback")]
pub async fn google_callback(
    ctx: web::Data<AuthContext>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    if let Some(error) = &query.error {
        log::warn!(
            "Google OAuth 에러: {} - {}",
            error,
            query.error_description.as_deref().unwrap_or("")
        );
        return Err(AppError::ValidationError(format!("oauth error: {}", error)));
    }

    ctx.google.validate_state(&query.state).await?;

    if query.code.is_empty() {
        return Err(AppError::ValidationError("missing authorization code".to_string()));
    }

    let info = ctx.google.fetch_user_info(&query.code).await?;
    let user = ctx.users.resolve_google_identity(&info).await?;

    let mut response = HttpResponse::Found();
    issue_session(&ctx, &mut response, user.id).await?;

    log::info!("Google 로그인 성공: id={}", user.id);
    ctx.audit
        .dispatch("authentication", format!("{} logged in with google", user.email));

    Ok(response
        .insert_header((header::LOCATION, ctx.settings.redirect_url.clone()))
        .finish())
}

/// 헬스체크
#[get("/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body(".")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::caching::EphemeralStore;
    use crate::core::context::tests::{harness, Harness};
    use crate::domain::entities::users::NewUser;
    use crate::repositories::users::UserRepository;
    use crate::routes::configure_all_routes;
    use crate::services::audit::audit_dispatcher::tests::drain;
    use crate::services::auth::google_auth_service::tests::{spawn_provider, PROVIDER_CODE};
    use crate::services::auth::CodePurpose;

    use super::*;

    const NO_PROVIDER: &str = "http://127.0.0.1:1";

    macro_rules! app {
        ($data:expr) => {
            test::init_service(
                App::new()
                    .app_data($data.clone())
                    .configure(configure_all_routes),
            )
            .await
        };
    }

    fn context(with_store: bool) -> (web::Data<AuthContext>, Harness) {
        let (ctx, harness) = harness(NO_PROVIDER, with_store);
        (web::Data::new(ctx), harness)
    }

    async fn seed_code(harness: &Harness, purpose: CodePurpose, email: &str, code: &str) {
        harness
            .store
            .save_pair(&purpose.store_key(email), code, Duration::from_secs(300))
            .await
            .unwrap();
    }

    async fn seed_user(data: &web::Data<AuthContext>, email: &str, password: &str) -> i64 {
        data.users
            .register_local(email, password, "Ada", "Lovelace")
            .await
            .unwrap()
            .id
    }

    fn cookie_value(resp: &actix_web::dev::ServiceResponse, name: &str) -> Option<String> {
        resp.response()
            .cookies()
            .find(|c| c.name() == name)
            .map(|c| c.value().to_string())
    }

    #[actix_web::test]
    async fn test_register_sets_cookies_then_conflicts() {
        let (data, harness) = context(true);
        let app = app!(data);
        seed_code(&harness, CodePurpose::SignupVerification, "a@b.com", "123456").await;

        let body = json!({
            "email": "a@b.com",
            "password": "secret1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "verification_code": "123456",
        });

        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/register").set_json(&body).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert!(cookie_value(&resp, ACCESS_COOKIE).is_some());
        assert!(cookie_value(&resp, REFRESH_COOKIE).is_some());

        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["error"], false);
        assert_eq!(json["message"], "Registered user a@b.com");
        assert!(json["data"]["id"].as_i64().unwrap() > 0);

        let again = test::call_service(
            &app,
            test::TestRequest::post().uri("/register").set_json(&body).to_request(),
        )
        .await;
        assert_eq!(again.status(), StatusCode::CONFLICT);

        drain(&harness.audit, 1).await;
        assert_eq!(harness.audit.names(), vec!["registration"]);
    }

    #[actix_web::test]
    async fn test_register_with_wrong_code_is_rejected() {
        let (data, harness) = context(true);
        let app = app!(data);
        seed_code(&harness, CodePurpose::SignupVerification, "a@b.com", "123456").await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(json!({
                    "email": "a@b.com",
                    "password": "secret1",
                    "verification_code": "654321",
                }))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(harness.repo.get_by_email("a@b.com").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_verify_code_mails_usable_code() {
        let (data, harness) = context(true);
        let app = app!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/verify-code")
                .set_json(json!({"email": "a@b.com"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "a@b.com sent successfully!");

        let mailed = harness.mailer.last_body().unwrap();
        let code = mailed.rsplit(": ").next().unwrap().to_string();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(json!({
                    "email": "a@b.com",
                    "password": "secret1",
                    "verification_code": code,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // 가입 후에는 같은 이메일로 코드를 받을 수 없음
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/verify-code")
                .set_json(json!({"email": "a@b.com"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_login_with_wrong_password_sets_no_cookies() {
        let (data, _harness) = context(true);
        seed_user(&data, "a@b.com", "secret1").await;
        let app = app!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/authenticate")
                .set_json(json!({"email": "a@b.com", "password": "wrong-password"}))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.response().cookies().count(), 0);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "invalid credentials");
    }

    #[actix_web::test]
    async fn test_login_returns_summary_and_cookies() {
        let (data, harness) = context(true);
        seed_user(&data, "a@b.com", "secret1").await;
        let app = app!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/authenticate")
                .set_json(json!({"email": "a@b.com", "password": "secret1"}))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        let access = cookie_value(&resp, ACCESS_COOKIE).unwrap();
        assert!(data.tokens.validate_access_token(&access).is_ok());

        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "Logged in user a@b.com");
        assert_eq!(json["data"]["first_name"], "Ada");
        assert!(json["data"].get("access_token").is_none());

        drain(&harness.audit, 1).await;
        assert_eq!(harness.audit.names(), vec!["authentication"]);
    }

    #[actix_web::test]
    async fn test_profile_refreshes_expired_access_cookie() {
        let (data, _harness) = context(true);
        let user_id = seed_user(&data, "a@b.com", "secret1").await;
        let app = app!(data);

        let now = Utc::now();
        let pair = data
            .tokens
            .generate_token_pair(
                user_id,
                now - chrono::Duration::minutes(1),
                now + chrono::Duration::days(7),
            )
            .await
            .unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/resource/profile")
                .cookie(Cookie::new(ACCESS_COOKIE, pair.access_token.clone()))
                .cookie(Cookie::new(REFRESH_COOKIE, pair.refresh_token.clone().unwrap()))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let new_access = cookie_value(&resp, ACCESS_COOKIE).unwrap();
        assert_ne!(new_access, pair.access_token);
        assert_eq!(data.tokens.validate_access_token(&new_access).unwrap(), user_id);

        let rotated = cookie_value(&resp, REFRESH_COOKIE).unwrap();
        assert_ne!(Some(rotated), pair.refresh_token);

        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "Profile fetched successfully");
        assert_eq!(json["data"]["email"], "a@b.com");
    }

    #[actix_web::test]
    async fn test_profile_with_valid_access_cookie_keeps_cookies() {
        let (data, _harness) = context(true);
        let user_id = seed_user(&data, "a@b.com", "secret1").await;
        let app = app!(data);

        let now = Utc::now();
        let pair = data
            .tokens
            .generate_token_pair(user_id, now + chrono::Duration::minutes(15), now + chrono::Duration::days(7))
            .await
            .unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/resource/profile")
                .cookie(Cookie::new(ACCESS_COOKIE, pair.access_token))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.response().cookies().count(), 0);
    }

    #[actix_web::test]
    async fn test_profile_without_cookies_is_unauthorized() {
        let (data, _harness) = context(true);
        let app = app!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/resource/profile").to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_logout_revokes_refresh_token() {
        let (data, _harness) = context(true);
        seed_user(&data, "a@b.com", "secret1").await;
        let app = app!(data);

        let login = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/authenticate")
                .set_json(json!({"email": "a@b.com", "password": "secret1"}))
                .to_request(),
        )
        .await;
        let refresh = cookie_value(&login, REFRESH_COOKIE).unwrap();

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/logout")
                .cookie(Cookie::new(REFRESH_COOKIE, refresh.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cleared: Vec<_> = resp.response().cookies().collect();
        assert_eq!(cleared.len(), 2);
        assert!(cleared.iter().all(|c| c.value().is_empty()));

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/resource/profile")
                .cookie(Cookie::new(REFRESH_COOKIE, refresh))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "refresh token invalid");
    }

    #[actix_web::test]
    async fn test_forgot_password_outcomes() {
        let (data, harness) = context(true);
        seed_user(&data, "a@b.com", "secret1").await;
        harness
            .repo
            .insert(NewUser::federated("g-1".into(), "g@b.com".into(), "G".into(), "H".into()))
            .await
            .unwrap();
        let app = app!(data);

        let call = |email: &'static str| {
            test::TestRequest::post()
                .uri("/forgot-password")
                .set_json(json!({"email": email}))
                .to_request()
        };

        let resp = test::call_service(&app, call("nobody@b.com")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(
            json["message"],
            "If an account exists with this email, a reset code has been sent"
        );
        assert_eq!(harness.mailer.count(), 0);

        let resp = test::call_service(&app, call("g@b.com")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = test::call_service(&app, call("")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = test::call_service(&app, call("a@b.com")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(harness.mailer.count(), 1);

        let resp = test::call_service(&app, call("a@b.com")).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        drain(&harness.audit, 1).await;
        assert_eq!(harness.audit.names(), vec!["password-reset-request"]);
    }

    #[actix_web::test]
    async fn test_reset_password_flow() {
        let (data, harness) = context(true);
        seed_user(&data, "a@b.com", "secret1").await;
        let app = app!(data);

        let reset = |code: &'static str| {
            test::TestRequest::post()
                .uri("/reset-password")
                .set_json(json!({
                    "email": "a@b.com",
                    "verification_code": code,
                    "new_password": "changed1",
                }))
                .to_request()
        };

        let resp = test::call_service(&app, reset("111111")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "invalid or expired reset code");

        seed_code(&harness, CodePurpose::PasswordReset, "a@b.com", "222222").await;

        let resp = test::call_service(&app, reset("111111")).await;
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["message"], "invalid verification code");

        assert!(harness.audit.names().is_empty());

        let resp = test::call_service(&app, reset("222222")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        drain(&harness.audit, 1).await;
        assert_eq!(harness.audit.names(), vec!["password-reset-complete"]);

        assert!(data.users.authenticate("a@b.com", "changed1").await.is_ok());
        assert!(data.users.authenticate("a@b.com", "secret1").await.is_err());
    }

    fn state_from(location: &str) -> String {
        let encoded = location
            .split(['?', '&'])
            .find_map(|pair| pair.strip_prefix("state="))
            .unwrap();
        urlencoding::decode(encoded).unwrap().into_owned()
    }

    #[actix_web::test]
    async fn test_google_login_round_trip() {
        let base = spawn_provider("g-sub-1", "ada@b.com").await;
        let (ctx, _harness) = harness(&base, true);
        let data = web::Data::new(ctx);
        let app = app!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/authenticate/google").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        let state = state_from(location);

        let callback = format!(
            "/oauth/google/callback?state={}&code={}",
            urlencoding::encode(&state),
            PROVIDER_CODE
        );

        let resp = test::call_service(&app, test::TestRequest::get().uri(&callback).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "http://app.local");
        assert!(cookie_value(&resp, ACCESS_COOKIE).is_some());
        assert!(cookie_value(&resp, REFRESH_COOKIE).is_some());

        let user = data.users.find_by_email("ada@b.com").await.unwrap().unwrap();
        assert_eq!(user.google_id.as_deref(), Some("g-sub-1"));

        // state는 한 번만 사용 가능
        let replay = test::call_service(&app, test::TestRequest::get().uri(&callback).to_request()).await;
        assert_eq!(replay.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_google_callback_with_provider_error() {
        let (data, _harness) = context(true);
        let app = app!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/oauth/google/callback?error=access_denied")
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_reduced_mode_without_store() {
        let (data, _harness) = context(false);
        seed_user(&data, "a@b.com", "secret1").await;
        let app = app!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/authenticate")
                .set_json(json!({"email": "a@b.com", "password": "secret1"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        assert!(cookie_value(&resp, ACCESS_COOKIE).is_some());
        assert!(cookie_value(&resp, REFRESH_COOKIE).is_none());

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/authenticate/google").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_ping() {
        let app = test::init_service(App::new().service(ping)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
