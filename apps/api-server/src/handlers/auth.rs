//! Authentication handlers.

use std::sync::Arc;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpResponse, web};

use inkpost_core::domain::NewUser;
use inkpost_core::ports::{PasswordService, TokenService};
use inkpost_shared::dto::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};

use crate::config::AppConfig;
use crate::middleware::auth::{Identity, SESSION_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Build the session cookie carrying a freshly issued token.
fn session_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    config: web::Data<AppConfig>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    // Duplicate checks are exact, case-sensitive matches.
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Duplicate("Email already registered".to_string()));
    }
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Duplicate("Username already taken".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .create(NewUser {
            username: req.username,
            email: req.email,
            password_hash,
        })
        .await?;

    let token = token_service
        .generate_token(&user.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let cookie = session_cookie(token, token_service.expiration_seconds(), config.production);

    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().cookie(cookie).json(AuthResponse {
        user: user.into(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    config: web::Data<AppConfig>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    // An unknown email and a wrong password produce identical responses,
    // keeping account enumeration out of the error message.
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = token_service
        .generate_token(&user.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let cookie = session_cookie(token, token_service.expiration_seconds(), config.production);

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().cookie(cookie).json(AuthResponse {
        user: user.into(),
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(AuthResponse {
        user: identity.user.into(),
    }))
}

/// POST /api/auth/logout
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(MessageResponse::new("Logged out successfully"))
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;
    use serde_json::{Value, json};

    use crate::handlers::testing::{init_app, test_context};

    #[actix_web::test]
    async fn test_register_sets_cookie_and_me_roundtrip() {
        let ctx = test_context();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "secret1"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "token")
            .expect("session cookie set")
            .into_owned();
        assert!(cookie.http_only().unwrap_or(false));

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["user"]["email"], "a@x.com");
        assert!(body["user"]["id"].as_str().is_some());
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("password_hash").is_none());

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let me: Value = test::read_body_json(resp).await;
        assert_eq!(me["user"]["username"], "alice");
        assert!(me["user"].get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn test_register_duplicate_email() {
        let ctx = test_context();
        let app = init_app!(ctx);

        for (i, expected) in [StatusCode::CREATED, StatusCode::BAD_REQUEST]
            .into_iter()
            .enumerate()
        {
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "username": format!("alice{}", i),
                    "email": "a@x.com",
                    "password": "secret1"
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);

            if expected == StatusCode::BAD_REQUEST {
                let body: Value = test::read_body_json(resp).await;
                assert_eq!(body["detail"], "Email already registered");
            }
        }
    }

    #[actix_web::test]
    async fn test_register_duplicate_username() {
        let ctx = test_context();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "secret1"
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "alice",
                "email": "other@x.com",
                "password": "secret1"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Username already taken");
    }

    #[actix_web::test]
    async fn test_register_short_password() {
        let ctx = test_context();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "pw"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Password must be at least 6 characters");
    }

    #[actix_web::test]
    async fn test_login_bad_credentials_are_indistinguishable() {
        let ctx = test_context();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "secret1"
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "a@x.com", "password": "wrong-password" }))
            .to_request();
        let wrong_password = test::call_service(&app, req).await;
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        let wrong_password_body: Value = test::read_body_json(wrong_password).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "nobody@x.com", "password": "secret1" }))
            .to_request();
        let unknown_email = test::call_service(&app, req).await;
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        let unknown_email_body: Value = test::read_body_json(unknown_email).await;

        assert_eq!(wrong_password_body, unknown_email_body);
    }

    #[actix_web::test]
    async fn test_login_success_sets_cookie() {
        let ctx = test_context();
        let app = init_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "secret1"
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "a@x.com", "password": "secret1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.response()
                .cookies()
                .any(|c| c.name() == "token" && !c.value().is_empty())
        );
    }

    #[actix_web::test]
    async fn test_me_without_cookie() {
        let ctx = test_context();
        let app = init_app!(ctx);

        let req = test::TestRequest::get().uri("/api/auth/me").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_me_with_garbage_token() {
        let ctx = test_context();
        let app = init_app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .cookie(actix_web::cookie::Cookie::new("token", "not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_logout_clears_cookie() {
        let ctx = test_context();
        let app = init_app!(ctx);

        let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .expect("removal cookie set")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("token="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
