use std::sync::Arc;

use anyhow::Result;
use china_explorer::{Engine, ExplorerConfig, GeminiBackend, VERSION, logging, web};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!("{:#}", err);
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = ExplorerConfig::load()?;
    logging::init(&config.logging)?;
    info!("Starting china-explorer {}", VERSION);

    let backend = GeminiBackend::new(&config.backend)?;
    let engine = Engine::spawn(&config, Arc::new(backend));

    web::run(&config.server, engine).await
}
