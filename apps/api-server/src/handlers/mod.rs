//! HTTP handlers and route configuration.

mod comments;
mod feed;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/posts", web::get().to(feed::front_page))
            .route("/posts/{id}", web::get().to(posts::post_detail))
            .route("/comments/{id}", web::get().to(comments::comment_detail))
            .route("/users/{username}/posts", web::get().to(feed::user_posts))
            // Authenticated mutation
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts/{id}", web::put().to(posts::update_post))
            .route("/posts/{id}", web::delete().to(posts::delete_post))
            .route(
                "/posts/{id}/comments",
                web::post().to(comments::create_comment),
            )
            .route("/comments/{id}", web::put().to(comments::update_comment))
            .route(
                "/comments/{id}",
                web::delete().to(comments::delete_comment),
            ),
    );
}
