//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use inkpost_core::domain::{NewPost, PostPatch};
use inkpost_shared::dto::{CreatePostRequest, MessageResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    /// Restrict the listing to a single author (profile view).
    pub author: Option<String>,
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = match &query.author {
        Some(author_id) => state.posts.find_by_author(author_id).await?,
        None => state.posts.find_all().await?,
    };

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(&id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts - Protected route
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    // Author fields come from the session user, never from the payload.
    let post = state
        .posts
        .create(NewPost {
            title: req.title,
            content: req.content,
            image_url: req.image_url,
            author_id: identity.user.id,
            author_username: identity.user.username,
        })
        .await?;

    tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id} - Protected route, author only
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let existing = state
        .posts
        .find_by_id(&id)
        .await?
        .ok_or_else(post_not_found)?;

    if existing.author_id != identity.user.id {
        return Err(AppError::Forbidden(
            "You can only edit your own posts".to_string(),
        ));
    }

    let patch = PostPatch {
        title: req.title,
        content: req.content,
        image_url: req.image_url,
    };
    let updated = state
        .posts
        .update(&id, patch)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/posts/{id} - Protected route, author only
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let existing = state
        .posts
        .find_by_id(&id)
        .await?
        .ok_or_else(post_not_found)?;

    if existing.author_id != identity.user.id {
        return Err(AppError::Forbidden(
            "You can only delete your own posts".to_string(),
        ));
    }

    if !state.posts.delete(&id).await? {
        return Err(post_not_found());
    }

    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}
