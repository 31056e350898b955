//! JWT session token implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use inkpost_core::ports::{AuthError, TokenClaims, TokenService};

/// JWT token service configuration. There is no default secret: the caller
/// must resolve one before the service can be built.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_days: i64,
}

impl JwtConfig {
    /// Session tokens last 7 days, fixed, non-renewable.
    pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiry_days: Self::DEFAULT_EXPIRY_DAYS,
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    iat: i64,    // issued at
    exp: i64,    // expiration timestamp
}

/// JWT-based session token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::days(self.config.expiry_days);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(TokenClaims {
            user_id: token_data.claims.sub,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiry_days * 24 * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtTokenService {
        JwtTokenService::new(JwtConfig::new("test-secret-key"))
    }

    #[test]
    fn test_generate_token_success() {
        let token = test_service().generate_token("user-1").unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_validate_token_success() {
        let service = test_service();
        let token = service.generate_token("user-1").unwrap();

        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, "user-1");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_validate_garbage_token() {
        let result = test_service().validate_token("not-a-token");
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_validate_expired_token() {
        let service = JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiry_days: -1,
        });

        let token = service.generate_token("user-1").unwrap();
        let result = service.validate_token(&token);

        assert!(matches!(result.unwrap_err(), AuthError::TokenExpired));
    }

    #[test]
    fn test_validate_wrong_secret() {
        let issuer = JwtTokenService::new(JwtConfig::new("secret-a"));
        let verifier = JwtTokenService::new(JwtConfig::new("secret-b"));

        let token = issuer.generate_token("user-1").unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_expiration_seconds() {
        assert_eq!(test_service().expiration_seconds(), 7 * 24 * 3600);
    }
}
