//! # Inkpost Core
//!
//! The domain layer of the Inkpost backend.
//! This crate contains pure business objects and ports with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
