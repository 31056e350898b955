use serde::{Deserialize, Serialize};

/// User entity - an account that can author posts.
///
/// The id is an opaque string assigned by the storage adapter. Users are
/// created at registration and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Fields required to create a user. The id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
