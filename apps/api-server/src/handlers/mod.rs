//! HTTP handlers and route configuration.

mod feed;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/feed", web::get().to(feed::personalized_feed))
            // Post lifecycle and engagement
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("", web::get().to(posts::search))
                    .route("/{id}", web::get().to(posts::get_by_id))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/like", web::post().to(posts::like))
                    .route("/{id}/unlike", web::post().to(posts::unlike))
                    .route("/{id}/comments", web::post().to(posts::comment))
                    .route("/{id}/shares", web::post().to(posts::share)),
            ),
    );
}
