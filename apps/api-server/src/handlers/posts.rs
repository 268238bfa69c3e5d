//! Post handlers - detail, create, update, delete.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::ensure_author;
use quill_core::ports::{BaseRepository, CommentRepository};
use quill_shared::dto::{
    CreatePostRequest, DeletedResponse, PostDetailResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts/{id} - the post and its comments, oldest comment first.
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;

    let comments = state.comments.list_by_post(id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post.into(),
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/posts - create a post authored by the acting identity.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }

    let post = Post::new(identity.user_id, req.title, req.body);
    let saved = state.posts.insert(post).await?;

    tracing::info!(post_id = %saved.id, author = %identity.username, "Post created");

    Ok(HttpResponse::Created().json(PostResponse::from(saved)))
}

/// PUT /api/posts/{id} - author-only update; bumps `last_edited_date`.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;

    ensure_author(identity.user_id, &post)?;

    post.apply_edit(identity.user_id, req.title, req.body);
    let saved = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(saved)))
}

/// DELETE /api/posts/{id} - author-only; comments go with the post.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", id)))?;

    ensure_author(identity.user_id, &post)?;

    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, author = %identity.username, "Post deleted");

    Ok(HttpResponse::Ok().json(DeletedResponse {
        redirect: "/".to_string(),
    }))
}
