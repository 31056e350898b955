//! Request payload validation.
//!
//! Each rule yields the message of the first failing field, which the API
//! surfaces verbatim in a 400 response.

use thiserror::Error;

use crate::dto::{CreatePostRequest, LoginRequest, RegisterRequest, UpdatePostRequest};

/// Message for the first failing field of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: &str) -> Self {
        Self(message.to_string())
    }
}

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;
const PASSWORD_MIN: usize = 6;

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let username_len = self.username.chars().count();
        if username_len < USERNAME_MIN {
            return Err(ValidationError::new("Username must be at least 3 characters"));
        }
        if username_len > USERNAME_MAX {
            return Err(ValidationError::new("Username must be at most 20 characters"));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::new("Invalid email address"));
        }
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(ValidationError::new("Password must be at least 6 characters"));
        }
        Ok(())
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_email(&self.email) {
            return Err(ValidationError::new("Invalid email address"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::new("Password is required"));
        }
        Ok(())
    }
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("Title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::new("Content is required"));
        }
        Ok(())
    }
}

impl UpdatePostRequest {
    /// All fields optional, but a provided title or content must be non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::new("Title cannot be empty"));
            }
        }
        if let Some(content) = &self.content {
            if content.trim().is_empty() {
                return Err(ValidationError::new("Content cannot be empty"));
            }
        }
        Ok(())
    }
}

/// Minimal email syntax check: a non-empty local part and a dotted domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
