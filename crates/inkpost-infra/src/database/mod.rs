//! Document store adapter.

mod connection;
pub mod document;
mod mongo_repo;

pub use connection::{MongoConfig, MongoStore};
pub use mongo_repo::{MongoPostRepository, MongoUserRepository};
