use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use inkpost_core::domain::{NewUser, User};

/// User record as stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl UserDocument {
    pub fn from_new(new_user: NewUser) -> Self {
        Self {
            id: ObjectId::new(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            username: doc.username,
            email: doc.email,
            password_hash: doc.password_hash,
        }
    }
}
