//! Document store repository implementations.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document, doc};
use mongodb::options::ReturnDocument;

use inkpost_core::domain::{NewPost, NewUser, Post, PostPatch, User};
use inkpost_core::error::RepoError;
use inkpost_core::ports::{PostRepository, UserRepository};

use super::document::{PostDocument, UserDocument};

fn query_err(e: mongodb::error::Error) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Document store user repository.
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let result = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = self
            .collection
            .find_one(doc! { "username": username })
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = self
            .collection
            .find_one(doc! { "email": email })
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let document = UserDocument::from_new(new_user);
        self.collection
            .insert_one(&document)
            .await
            .map_err(query_err)?;

        Ok(document.into())
    }
}

/// Document store post repository.
pub struct MongoPostRepository {
    collection: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(collection: Collection<PostDocument>) -> Self {
        Self { collection }
    }

    async fn find_sorted(&self, filter: Document) -> Result<Vec<Post>, RepoError> {
        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(query_err)?;

        let documents: Vec<PostDocument> = cursor.try_collect().await.map_err(query_err)?;
        Ok(documents.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        self.find_sorted(doc! {}).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let result = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Post>, RepoError> {
        self.find_sorted(doc! { "author_id": author_id }).await
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let document = PostDocument::from_new(new_post);
        self.collection
            .insert_one(&document)
            .await
            .map_err(query_err)?;

        Ok(document.into())
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let mut set = doc! { "updated_at": bson::DateTime::now() };
        if let Some(title) = patch.title {
            set.insert("title", title);
        }
        if let Some(content) = patch.content {
            set.insert("content", content);
        }
        if let Some(image_url) = patch.image_url {
            set.insert("image_url", image_url);
        }

        let result = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: &str) -> Result<bool, RepoError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(query_err)?;

        Ok(result.deleted_count > 0)
    }
}

/// Mask an email for logging to keep PII out of logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let mut chars = local.chars();
            // First char only when the local part has more to hide.
            match chars.next() {
                Some(first) if chars.next().is_some() => format!("{first}***{domain}"),
                _ => format!("***{domain}"),
            }
        }
        None => "***".to_string(),
    }
}
