//! VitaFlex AI client shell
//!
//! Entry point: load configuration and serve the shell.

use std::sync::Arc;

use dotenvy::dotenv;
use mimalloc::MiMalloc;
use tracing::info;

use vitaflex_shell::{config::AppConfig, server, telemetry};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    telemetry::init();

    let config = AppConfig::load()?;
    info!(
        name: "config.loaded",
        address = %config.bind_address(),
        static_dir = %config.ui.static_dir,
        "Configuration loaded"
    );

    server::start_server(Arc::new(config)).await
}
