//! Comment handlers - detail, create, update, delete.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_core::ensure_author;
use quill_core::ports::BaseRepository;
use quill_shared::dto::{
    CommentResponse, CreateCommentRequest, DeletedResponse, UpdateCommentRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/comments/{id}
pub async fn comment_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("comment {} not found", id)))?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// POST /api/posts/{id}/comments - comment on an existing post.
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("Comment must not be empty".to_string()));
    }

    // The parent must exist before anything is written
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))?;

    let comment = Comment::new(post.id, identity.user_id, req.body);
    let saved = state.comments.insert(comment).await?;

    tracing::info!(comment_id = %saved.id, post_id = %post.id, "Comment created");

    Ok(HttpResponse::Created().json(CommentResponse::from(saved)))
}

/// PUT /api/comments/{id} - author-only update; bumps `last_edited_date`.
pub async fn update_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("Comment must not be empty".to_string()));
    }

    let mut comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("comment {} not found", id)))?;

    ensure_author(identity.user_id, &comment)?;

    comment.apply_edit(identity.user_id, req.body);
    let saved = state.comments.update(comment).await?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(saved)))
}

/// DELETE /api/comments/{id} - author-only; points the client back at the
/// parent post.
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let comment = state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("comment {} not found", id)))?;

    ensure_author(identity.user_id, &comment)?;

    // Resolve the parent before the row disappears
    let redirect = format!("/posts/{}", comment.post_id);

    state.comments.delete(id).await?;

    tracing::info!(comment_id = %id, post_id = %comment.post_id, "Comment deleted");

    Ok(HttpResponse::Ok().json(DeletedResponse { redirect }))
}
