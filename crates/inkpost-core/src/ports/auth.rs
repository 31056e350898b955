//! Authentication ports - session tokens and password hashing.

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: String,
    pub exp: i64,
}

/// Session token service. Tokens are time-limited and non-renewable.
pub trait TokenService: Send + Sync {
    /// Issue a signed token scoped to a user id.
    fn generate_token(&self, user_id: &str) -> Result<String, AuthError>;

    /// Verify a token's signature and expiry, returning its claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Token lifetime in seconds, also used for the session cookie max-age.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Authentication required")]
    MissingToken,

    #[error("User not found")]
    UnknownUser,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
