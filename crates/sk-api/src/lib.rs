//! # sk-api
//!
//! The web routing and orchestration layer for StackIt.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use actix_web::web;

pub use state::AppState;

/// Configures the StackIt routes.
///
/// Pages are plain GETs; every POST mutates the viewer's session and
/// redirects back to a page. The binary adds static files and the
/// not-found fallback (`handlers::not_found`).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Listings
        .route("/", web::get().to(handlers::home))
        .route("/unanswered", web::get().to(handlers::unanswered))
        // Ask page: GET renders the draft, POST applies a draft command
        .service(
            web::resource("/ask")
                .route(web::get().to(handlers::ask))
                .route(web::post().to(handlers::ask_command)),
        )
        // Question detail and everything done on it
        .route("/questions/{id}", web::get().to(handlers::question))
        .route("/questions/{id}/vote/{direction}", web::post().to(handlers::vote_question))
        .route("/questions/{id}/answers", web::post().to(handlers::post_answer))
        .route(
            "/questions/{id}/answers/{answer}/vote/{direction}",
            web::post().to(handlers::vote_answer),
        )
        .route("/questions/{id}/answers/{answer}/accept", web::post().to(handlers::accept_answer))
        .route("/questions/{id}/answers/{answer}/pin", web::post().to(handlers::pin_answer))
        .route("/questions/{id}/answers/{answer}/comments", web::post().to(handlers::add_comment))
        .route(
            "/questions/{id}/answers/{answer}/comments/toggle",
            web::post().to(handlers::toggle_comments),
        )
        .route(
            "/questions/{id}/answers/{answer}/actions/{action}",
            web::post().to(handlers::answer_action),
        )
        // Auth pages
        .service(
            web::resource("/login")
                .route(web::get().to(handlers::login))
                .route(web::post().to(handlers::login_submit)),
        )
        .route("/login/social/{provider}", web::post().to(handlers::login_social))
        .service(
            web::resource("/signup")
                .route(web::get().to(handlers::signup))
                .route(web::post().to(handlers::signup_submit)),
        )
        .route("/signup/social/{provider}", web::post().to(handlers::signup_social))
        // Header actions
        .route("/notifications/read-all", web::post().to(handlers::mark_all_read))
        .route("/notifications/{id}/read", web::post().to(handlers::mark_read))
        .route("/logout", web::post().to(handlers::logout));
}
