//! Stored document shapes and their mapping to domain entities.
//!
//! The mapping performs id stringification (ObjectId to hex) and field
//! conversion only; no business logic lives here.

mod post;
mod user;

pub use post::PostDocument;
pub use user::UserDocument;
