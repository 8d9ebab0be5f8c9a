//! # StackIt Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod settings;

use std::sync::Arc;
use std::time::Duration;

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use sk_api::handlers::not_found;
use sk_api::middleware::{security_headers, standard_middleware};
use sk_api::state::SessionLimits;
use sk_api::{configure_routes, AppState};

// Feature-gated imports: each plugin fills one port.
#[cfg(feature = "fixtures")]
use sk_fixtures::FixtureSource;

#[cfg(feature = "clipboard-memory")]
use sk_clipboard_memory::MemoryClipboard;

use crate::settings::Settings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load().map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    // 1. Forum data
    #[cfg(feature = "fixtures")]
    let source = FixtureSource::new();

    // 2. Clipboard for share links
    #[cfg(feature = "clipboard-memory")]
    let clipboard = MemoryClipboard::new();

    let limits = SessionLimits {
        max_sessions: settings.max_sessions,
        idle: Duration::from_secs(settings.session_idle_minutes * 60),
    };
    let state = web::Data::new(
        AppState::new(Box::new(source), Arc::new(clipboard), settings.base_url.clone()).with_session_limits(limits),
    );

    log::info!("StackIt starting on http://{}:{}", settings.host, settings.port);

    let static_dir = settings.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(security_headers())
            .wrap(standard_middleware())
            .service(Files::new("/static", &static_dir))
            .configure(configure_routes)
            .default_service(web::to(not_found))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
