use std::path::PathBuf;

use crate::dashboard::Locale;

/// Default port of the scheduling service
pub const DEFAULT_PORT: u16 = 8000;

/// Default request body limit (1 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Settings for `serve`
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory of static dashboard assets, served at `/` when it exists
    pub web_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            web_dir: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Settings for `run`
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the scheduling service, without the `/api/...` path
    pub server_url: String,
    pub locale: Locale,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: format!("http://127.0.0.1:{}", DEFAULT_PORT),
            locale: Locale::default(),
        }
    }
}
