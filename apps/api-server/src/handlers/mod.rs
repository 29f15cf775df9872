//! HTTP handlers and route configuration.

mod ai;
mod auth;
mod health;
mod posts;

use std::sync::Arc;

use actix_web::{ResponseError, web};

use journal_core::ports::RateLimiter;

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, ai_limiter: Arc<dyn RateLimiter>) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Writer session
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/status", web::get().to(auth::status))
                    .route("/logout", web::post().to(auth::logout)),
            )
            // Posts - reads are public, writes need the writer
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/privacy", web::patch().to(posts::toggle_privacy)),
            )
            .service(
                web::scope("/ai")
                    .wrap(RateLimitMiddleware::new(ai_limiter, "ai"))
                    .route("/enhance", web::post().to(ai::enhance)),
            ),
    )
    .default_service(web::to(|| async {
        AppError::NotFound("No such route".to_string()).error_response()
    }));
}
