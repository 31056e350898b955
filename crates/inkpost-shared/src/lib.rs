//! # Inkpost Shared
//!
//! Types shared between the API server and its clients: request payloads
//! with field-level validation, and public response shapes.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::ErrorResponse;
pub use validation::ValidationError;
