//! Parser server binary
//!
//! Run with: cargo run -p krushflow-parser --bin krushflow-server

use krushflow_parser::{config::ParserConfig, server::ParserServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "krushflow_parser=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║             KrushFlow Document Parser API Server          ║
║          Document Upload with Simulated OCR Parsing       ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let config_path = std::env::var("KRUSHFLOW_CONFIG").ok().map(PathBuf::from);
    let config = ParserConfig::load(config_path.as_deref())?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Data file: {}", config.storage.data_file.display());
    tracing::info!("  - Static root: {}", config.static_files.root.display());
    tracing::info!("  - Max upload size: {} bytes", config.server.max_upload_size);

    // Create and start server
    let server = ParserServer::new(config)?;

    println!("\nServer starting on http://{}", server.address());
    println!("\nAPI Endpoints:");
    println!("  POST /api/parse    - Parse uploaded documents");
    println!("  GET  /api/data     - Get all parsed data");
    println!("  GET  /api/data/:id - Get specific session data");
    println!("  POST /api/clear    - Clear all server data");
    println!("  GET  /health       - Health check");
    println!("\nWeb Interface:");
    println!("  GET  /             - Document parser interface");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
