//! In-memory repositories - used as fallback when the document store is not
//! configured, and as the substrate for handler tests.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use inkpost_core::domain::{NewPost, NewUser, Post, PostPatch, User};
use inkpost_core::error::RepoError;
use inkpost_core::ports::{PostRepository, UserRepository};

/// In-memory user repository backed by a HashMap with an async RwLock.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let user = User {
            id: ObjectId::new().to_hex(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
        };

        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<String, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    fn sorted_desc(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(Self::sorted_desc(posts.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.get(id).cloned())
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(Self::sorted_desc(
            posts
                .values()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let post = Post {
            id: ObjectId::new().to_hex(),
            title: new_post.title,
            content: new_post.content,
            image_url: new_post.image_url,
            author_id: new_post.author_id,
            author_username: new_post.author_username,
            created_at: now,
            updated_at: now,
        };

        let mut posts = self.posts.write().await;
        posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;

        let Some(post) = posts.get_mut(id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(image_url) = patch.image_url {
            post.image_url = Some(image_url);
        }
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn new_post(title: &str, author_id: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "content".to_string(),
            image_url: None,
            author_id: author_id.to_string(),
            author_username: "author".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("alice", "a@x.com")).await.unwrap();

        assert!(!user.id.is_empty());
        assert_eq!(
            repo.find_by_id(&user.id).await.unwrap().unwrap().username,
            "alice"
        );
        assert!(repo.find_by_username("alice").await.unwrap().is_some());
        assert!(repo.find_by_email("a@x.com").await.unwrap().is_some());
        assert!(repo.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_posts_ordered_newest_first() {
        let repo = InMemoryPostRepository::new();
        let first = repo.create(new_post("first", "u1")).await.unwrap();
        let second = repo.create(new_post("second", "u1")).await.unwrap();
        let third = repo.create(new_post("third", "u2")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![&third.id, &second.id, &first.id]);
    }

    #[tokio::test]
    async fn test_find_by_author_filters_and_sorts() {
        let repo = InMemoryPostRepository::new();
        let a1 = repo.create(new_post("a1", "alice")).await.unwrap();
        let _b1 = repo.create(new_post("b1", "bob")).await.unwrap();
        let a2 = repo.create(new_post("a2", "alice")).await.unwrap();

        let posts = repo.find_by_author("alice").await.unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![&a2.id, &a1.id]);
    }

    #[tokio::test]
    async fn test_update_applies_patch_and_restamps() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("title", "u1")).await.unwrap();

        let patch = PostPatch {
            title: Some("new title".to_string()),
            ..Default::default()
        };
        let updated = repo.update(&post.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.title, "new title");
        assert_eq!(updated.content, "content");
        assert!(updated.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let repo = InMemoryPostRepository::new();
        let result = repo.update("missing", PostPatch::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("title", "u1")).await.unwrap();

        assert!(repo.delete(&post.id).await.unwrap());
        assert!(!repo.delete(&post.id).await.unwrap());
        assert!(repo.find_by_id(&post.id).await.unwrap().is_none());
    }
}
