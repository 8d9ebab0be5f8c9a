//! Start-up settings, read from the environment (`STACKIT_*`, optionally via
//! a `.env` file) on top of built-in defaults.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Public origin, used in share links.
    pub base_url: String,
    pub static_dir: String,
    /// Live viewer sessions kept before the least recently seen is dropped.
    pub max_sessions: usize,
    pub session_idle_minutes: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("base_url", "http://127.0.0.1:8080")?
            .set_default("static_dir", "./static")?
            .set_default("max_sessions", 10_000)?
            .set_default("session_idle_minutes", 30)?
            .add_source(Environment::with_prefix("STACKIT"))
            .build()?
            .try_deserialize()
    }
}
