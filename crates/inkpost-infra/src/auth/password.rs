//! Bcrypt password hashing implementation.

use inkpost_core::ports::{AuthError, PasswordService};

/// Bcrypt-based password service with a salted adaptive hash.
pub struct BcryptPasswordService {
    cost: u32,
}

impl BcryptPasswordService {
    /// Cost factor used in production.
    pub const DEFAULT_COST: u32 = 10;

    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordService {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

impl PasswordService for BcryptPasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost).map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, hash).map_err(|e| AuthError::HashingError(e.to_string()))
    }
}
