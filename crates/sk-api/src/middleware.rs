//! stackit/crates/sk-api/src/middleware.rs Middleware
//!
//! Access logging and security headers.

use actix_web::middleware::{DefaultHeaders, Logger};

/// Request logger for the StackIt server.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent"
    Logger::default()
}

/// Headers added to every response. Pages only load the local stylesheet and
/// never need to be framed.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Content-Security-Policy", "default-src 'self'; frame-ancestors 'none'"))
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
}
