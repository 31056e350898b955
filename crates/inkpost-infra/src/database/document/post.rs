use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use inkpost_core::domain::{NewPost, Post};

/// Post record as stored in the `posts` collection.
///
/// `author_id` is kept as the user's hex id string, matching the opaque ids
/// the API exchanges, so author lookups need no ObjectId round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_id: String,
    pub author_username: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl PostDocument {
    pub fn from_new(new_post: NewPost) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: ObjectId::new(),
            title: new_post.title,
            content: new_post.content,
            image_url: new_post.image_url,
            author_id: new_post.author_id,
            author_username: new_post.author_username,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            content: doc.content,
            image_url: doc.image_url,
            author_id: doc.author_id,
            author_username: doc.author_username,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_to_domain_preserves_timestamps() {
        let doc = PostDocument::from_new(NewPost {
            title: "title".to_string(),
            content: "content".to_string(),
            image_url: None,
            author_id: "u1".to_string(),
            author_username: "alice".to_string(),
        });
        let created_millis = doc.created_at.timestamp_millis();

        let post: Post = doc.into();

        assert_eq!(post.created_at.timestamp_millis(), created_millis);
        assert_eq!(post.updated_at, post.created_at);
    }
}
