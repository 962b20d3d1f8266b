use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Config file picked up from the working directory when none is given.
const CWD_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the backend API (e.g. http://localhost:8000/api/v1)
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// URL probed for the backend status banner
    #[arg(long, env = "BACKEND_HEALTH_URL")]
    pub health_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Prefix for the feature endpoints (`/coach`, `/food-scanner`, ...).
    pub base_url: String,
    /// Liveness probe target, normally the backend root.
    pub health_url: String,
    /// Per-request timeout. Unset means the transport default (none).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub static_dir: String,
    pub max_upload_bytes: usize,
    /// Idle time after which a browser session and its transcript are dropped.
    pub session_idle_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 8501)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("backend.base_url", "http://localhost:8000/api/v1")?
            .set_default("backend.health_url", "http://localhost:8000/")?
            .set_default("ui.static_dir", "static")?
            .set_default("ui.max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("ui.session_idle_secs", 24 * 60 * 60)?;

        // Explicit file wins; otherwise ./config.yaml if present.
        match &cli.config {
            Some(path) => builder = builder.add_source(File::with_name(path)),
            None if Path::new(CWD_CONFIG_FILE).exists() => {
                builder = builder.add_source(File::with_name(CWD_CONFIG_FILE));
            }
            None => {}
        }

        // E.g. VITAFLEX_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("VITAFLEX")
                .separator("__")
                .try_parsing(true),
        );

        // Priority: CLI flag > CLI env var > VITAFLEX_ env > config file > defaults.
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(url) = cli.health_url {
            builder = builder.set_override("backend.health_url", url)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }

    /// Socket address string the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
