//! Application state - shared across all handlers.

use std::sync::Arc;

use inkpost_core::ports::{PostRepository, UserRepository};
use inkpost_infra::database::{MongoConfig, MongoStore};
use inkpost_infra::memory::{InMemoryPostRepository, InMemoryUserRepository};

/// Shared application state: the storage adapters behind the route handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&MongoConfig>) -> Self {
        match db_config {
            Some(config) => match MongoStore::connect(config).await {
                Ok(store) => {
                    tracing::info!("Application state initialized (document store)");
                    Self {
                        users: Arc::new(store.users()),
                        posts: Arc::new(store.posts()),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to document store: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("MONGODB_URL not set. Running with in-memory storage.");
                Self::in_memory()
            }
        }
    }

    /// In-memory state, also used by handler tests.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
        }
    }
}
