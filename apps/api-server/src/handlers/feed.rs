//! Feed handlers - the front page and per-user post listings.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::ports::{PostRepository, UserRepository};
use quill_shared::dto::{FeedResponse, UserFeedResponse, UserProfile};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// `?page=N` query parameter, 1-based. Defaults to the first page.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default = "first_page")]
    pub page: u64,
}

fn first_page() -> u64 {
    1
}

/// GET /api/posts - the front-page feed, newest first, 10 per page.
pub async fn front_page(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.list_page(query.page).await?;

    Ok(HttpResponse::Ok().json(FeedResponse::from(page)))
}

/// GET /api/users/{username}/posts - one user's feed plus their profile.
/// 404 when no such user exists.
pub async fn user_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", username)))?;

    let page = state.posts.list_by_author_page(user.id, query.page).await?;

    Ok(HttpResponse::Ok().json(UserFeedResponse {
        user: UserProfile::from(user),
        posts: page.items.into_iter().map(Into::into).collect(),
        page: page.page,
        per_page: page.per_page,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }))
}
