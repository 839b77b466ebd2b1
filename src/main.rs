// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triage::config::TriageConfig;
use triage::llm::GeminiClient;
use triage::server::{router, AppState};

#[derive(Parser)]
#[command(name = "triage-server")]
#[command(about = "Customer inquiry triage API powered by Google Gemini")]
struct Args {
    /// Bind host (overrides TRIAGE_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides TRIAGE_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    // Fail fast: without a credential every request would fail individually.
    let mut config = TriageConfig::from_env().context("fatal configuration error")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Starting triage server");

    let gemini = GeminiClient::new(&config)?;
    info!("Model: {}", gemini.model());
    let state = AppState {
        gemini: Arc::new(gemini),
    };
    let app = router(state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    info!("Gemini Triage API listening on http://{bind_address}");
    axum::serve(listener, app).await?;

    Ok(())
}
