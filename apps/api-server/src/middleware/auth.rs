//! Session extraction - the cookie-based authentication layer.

use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;

use inkpost_core::domain::User;
use inkpost_core::ports::{AuthError, TokenService};
use inkpost_shared::ErrorResponse;

use crate::state::AppState;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "token";

/// Authenticated user extractor.
///
/// Reads the session cookie, verifies the token, and loads the user fresh
/// from storage - a deleted user holding a live token is rejected. Use this
/// in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::MissingToken => ErrorResponse::unauthorized("Authentication required"),
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your session has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::UnknownUser => ErrorResponse::unauthorized("User not found"),
            AuthError::InvalidCredentials => ErrorResponse::unauthorized("Invalid credentials"),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token_service = req
                .app_data::<web::Data<Arc<dyn TokenService>>>()
                .cloned()
                .ok_or_else(|| {
                    tracing::error!("TokenService not found in app data");
                    AuthenticationError(AuthError::InvalidToken(
                        "Server configuration error".to_string(),
                    ))
                })?;

            let state = req.app_data::<web::Data<AppState>>().cloned().ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                AuthenticationError(AuthError::InvalidToken(
                    "Server configuration error".to_string(),
                ))
            })?;

            let cookie = req
                .cookie(SESSION_COOKIE)
                .ok_or(AuthenticationError(AuthError::MissingToken))?;

            let claims = token_service
                .validate_token(cookie.value())
                .map_err(AuthenticationError)?;

            let user = state
                .users
                .find_by_id(&claims.user_id)
                .await
                .map_err(|e| {
                    tracing::error!("User lookup failed during authentication: {}", e);
                    AuthenticationError(AuthError::UnknownUser)
                })?
                .ok_or(AuthenticationError(AuthError::UnknownUser))?;

            Ok(Identity { user })
        })
    }
}
