//! Document store connection management.

use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel, bson::doc};

use inkpost_core::error::RepoError;

use super::document::{PostDocument, UserDocument};
use super::mongo_repo::{MongoPostRepository, MongoUserRepository};

/// Configuration for the document store.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub url: String,
    pub database: String,
}

/// Connection to the document store, handing out typed repositories.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect and prepare collections.
    ///
    /// The driver connects lazily, so a ping runs here to surface a bad URL
    /// at startup instead of on the first request.
    pub async fn connect(config: &MongoConfig) -> Result<Self, RepoError> {
        tracing::info!("Connecting to document store...");

        let client = Client::with_uri_str(&config.url)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        let db = client.database(&config.database);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        let store = Self { db };
        store.ensure_indexes().await?;

        tracing::info!(database = %config.database, "Document store connected");
        Ok(store)
    }

    /// Unique indexes on username and email back the API-level duplicate
    /// checks against racing registrations.
    async fn ensure_indexes(&self) -> Result<(), RepoError> {
        let unique = IndexOptions::builder().unique(true).build();

        for field in ["username", "email"] {
            let index = IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(unique.clone())
                .build();

            self.user_collection()
                .create_index(index)
                .await
                .map_err(|e| RepoError::Query(e.to_string()))?;
        }

        Ok(())
    }

    fn user_collection(&self) -> Collection<UserDocument> {
        self.db.collection("users")
    }

    fn post_collection(&self) -> Collection<PostDocument> {
        self.db.collection("posts")
    }

    pub fn users(&self) -> MongoUserRepository {
        MongoUserRepository::new(self.user_collection())
    }

    pub fn posts(&self) -> MongoPostRepository {
        MongoPostRepository::new(self.post_collection())
    }
}
