use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, PostPatch, User};
use crate::error::RepoError;

/// User repository. Uniqueness of username and email is checked at the API
/// layer via the exact-match lookups here before insertion.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by its opaque id.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by exact username match.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user, assigning its id.
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, ordered by creation time descending.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its opaque id. Malformed ids are treated as absent.
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Posts by a given author, ordered by creation time descending.
    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Post>, RepoError>;

    /// Persist a new post, assigning its id and timestamps.
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update, restamping `updated_at`. Returns the updated
    /// post, or `None` if no post with that id exists.
    async fn update(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, RepoError>;

    /// Delete a post. Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, RepoError>;
}
