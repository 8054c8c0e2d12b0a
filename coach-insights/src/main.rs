//! coach-insights - Chess coach insight service
//!
//! Serves `POST /api/chess/insights`, turning a position into short coach
//! commentary through an OpenAI-compatible chat completions API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coach_common::config::load_module_config;
use coach_insights::config::InsightsConfig;
use coach_insights::llm::OpenAiClient;
use coach_insights::{build_router, AppState, InsightGenerator};

const MODULE_NAME: &str = "coach-insights";

/// Command-line arguments for coach-insights
#[derive(Parser, Debug)]
#[command(name = "coach-insights")]
#[command(about = "Chess coach insight service")]
#[command(version)]
struct Args {
    /// Address to listen on (default 127.0.0.1:5780)
    #[arg(short, long)]
    bind: Option<String>,

    /// TOML config file (default: ~/.config/chess-coach/coach-insights.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_module_config(args.config.as_deref(), MODULE_NAME)
        .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},tower_http=debug", toml_config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting coach-insights");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = InsightsConfig::resolve(args.bind.as_deref(), &toml_config);

    let backend = OpenAiClient::new(&config.openai_base_url, config.api_key.clone())
        .context("Failed to create OpenAI client")?;
    let generator = InsightGenerator::new(
        Arc::new(backend),
        config.primary_model.clone(),
        config.fallback_model.clone(),
    );

    let app = build_router(AppState::new(generator));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
