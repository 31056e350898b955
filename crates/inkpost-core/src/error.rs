//! Storage-level error types.

use thiserror::Error;

/// Repository errors surfaced by storage adapters.
///
/// Handlers map these to a generic server error; the detail is logged and
/// never leaked to the client.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store operation failed: {0}")]
    Query(String),
}
