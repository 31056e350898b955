//! # Inkpost Infrastructure
//!
//! Concrete implementations of the ports defined in `inkpost-core`:
//! document-store repositories, in-memory fallbacks, JWT session tokens,
//! and bcrypt password hashing.

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{BcryptPasswordService, JwtConfig, JwtTokenService};
pub use database::{MongoConfig, MongoStore};
pub use memory::{InMemoryPostRepository, InMemoryUserRepository};
