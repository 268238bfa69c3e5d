//! Handler tests running against the in-memory repositories.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::TimeDelta;

use quill_core::domain::{Post, User};
use quill_core::ports::{BaseRepository, TokenService};
use quill_infra::{JwtConfig, JwtTokenService};
use quill_shared::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, DeletedResponse, FeedResponse,
    PostDetailResponse, PostResponse, UpdatePostRequest, UserFeedResponse,
};

use crate::handlers::configure_routes;
use crate::state::AppState;

fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "quill-test".to_string(),
    }))
}

async fn seed_user(state: &AppState, username: &str) -> User {
    let user = User::new(username.to_string(), format!("{username}@example.com"));
    state.users.insert(user.clone()).await.unwrap();
    user
}

/// A post whose `posted_date` is shifted by `offset_secs`, so ordering
/// assertions don't hinge on sub-microsecond timestamps.
async fn seed_post(state: &AppState, author: &User, offset_secs: i64, title: &str) -> Post {
    let mut post = Post::new(author.id, title.to_string(), "body".to_string());
    post.posted_date += TimeDelta::seconds(offset_secs);
    post.last_edited_date = post.posted_date;
    state.posts.insert(post).await.unwrap()
}

fn bearer(tokens: &Arc<dyn TokenService>, user: &User) -> (&'static str, String) {
    let token = tokens.generate_token(user.id, &user.username).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! test_app {
    ($state:expr, $tokens:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new($tokens.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn front_page_feed_is_sorted_and_paginated() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "alice").await;

    for i in 0..12 {
        seed_post(&state, &author, i, &format!("post {i}")).await;
    }

    let app = test_app!(state, tokens);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let feed: FeedResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(feed.posts.len(), 10);
    assert_eq!(feed.page, 1);
    assert_eq!(feed.per_page, 10);
    assert_eq!(feed.total_items, 12);
    assert_eq!(feed.total_pages, 2);
    assert_eq!(feed.posts[0].title, "post 11");
    assert!(
        feed.posts
            .windows(2)
            .all(|w| w[0].posted_date >= w[1].posted_date)
    );

    let req = test::TestRequest::get()
        .uri("/api/posts?page=2")
        .to_request();
    let feed: FeedResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(feed.posts.len(), 2);
    assert_eq!(feed.posts[1].title, "post 0");
}

#[actix_web::test]
async fn user_feed_contains_only_their_posts() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let alice = seed_user(&state, "alice").await;
    let bob = seed_user(&state, "bob").await;

    seed_post(&state, &alice, 0, "hers").await;
    seed_post(&state, &bob, 1, "his").await;

    let app = test_app!(state, tokens);

    let req = test::TestRequest::get()
        .uri("/api/users/alice/posts")
        .to_request();
    let feed: UserFeedResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(feed.user.username, "alice");
    assert_eq!(feed.posts.len(), 1);
    assert!(feed.posts.iter().all(|p| p.author_id == alice.id));
}

#[actix_web::test]
async fn user_feed_is_404_for_unknown_user() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = test_app!(state, tokens);

    let req = test::TestRequest::get()
        .uri("/api/users/ghost/posts")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn mutation_requires_authentication() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = test_app!(state, tokens);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(CreatePostRequest {
            title: "untitled".to_string(),
            body: "body".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn author_can_create_and_update_their_post() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let alice = seed_user(&state, "alice").await;
    let app = test_app!(state, tokens);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&tokens, &alice))
        .set_json(CreatePostRequest {
            title: "first".to_string(),
            body: "hello".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: PostResponse = test::read_body_json(resp).await;
    assert_eq!(created.author_id, alice.id);
    assert_eq!(created.likes, 0);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", created.id))
        .insert_header(bearer(&tokens, &alice))
        .set_json(UpdatePostRequest {
            title: "first, revised".to_string(),
            body: "hello again".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: PostResponse = test::read_body_json(resp).await;
    assert_eq!(updated.title, "first, revised");
    assert_eq!(updated.posted_date, created.posted_date);
    assert!(updated.last_edited_date > created.last_edited_date);
    assert!(updated.last_edited_date >= updated.posted_date);
}

#[actix_web::test]
async fn non_author_mutation_is_forbidden() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let alice = seed_user(&state, "alice").await;
    let bob = seed_user(&state, "bob").await;
    let post = seed_post(&state, &alice, 0, "hers").await;
    let app = test_app!(state, tokens);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(bearer(&tokens, &bob))
        .set_json(UpdatePostRequest {
            title: "hijacked".to_string(),
            body: "mine now".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(bearer(&tokens, &bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The post is untouched
    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let detail: PostDetailResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail.post.title, "hers");
}

#[actix_web::test]
async fn deleting_a_post_removes_comments_and_redirects_home() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let alice = seed_user(&state, "alice").await;
    let bob = seed_user(&state, "bob").await;
    let post = seed_post(&state, &alice, 0, "doomed").await;
    let app = test_app!(state, tokens);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .insert_header(bearer(&tokens, &bob))
        .set_json(CreateCommentRequest {
            body: "nice post".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let comment: CommentResponse = test::read_body_json(resp).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(bearer(&tokens, &alice))
        .to_request();
    let deleted: DeletedResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted.redirect, "/");

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/comments/{}", comment.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn comment_is_bound_to_parent_and_delete_redirects_there() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let alice = seed_user(&state, "alice").await;
    let bob = seed_user(&state, "bob").await;
    let post = seed_post(&state, &alice, 0, "discussed").await;
    let app = test_app!(state, tokens);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .insert_header(bearer(&tokens, &bob))
        .set_json(CreateCommentRequest {
            body: "well said".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let comment: CommentResponse = test::read_body_json(resp).await;
    assert_eq!(comment.post_id, post.id);
    assert_eq!(comment.author_id, bob.id);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/comments/{}", comment.id))
        .insert_header(bearer(&tokens, &bob))
        .to_request();
    let deleted: DeletedResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted.redirect, format!("/posts/{}", post.id));
}

#[actix_web::test]
async fn commenting_on_a_missing_post_is_404() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let bob = seed_user(&state, "bob").await;
    let app = test_app!(state, tokens);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", uuid::Uuid::new_v4()))
        .insert_header(bearer(&tokens, &bob))
        .set_json(CreateCommentRequest {
            body: "into the void".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
