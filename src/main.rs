use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use stack_rag_chat::config::Settings;
use stack_rag_chat::logger;
use stack_rag_chat::server::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "stack-rag-chat")]
#[command(about = "Retrieval-augmented chat endpoint over a Llama Stack server")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logger::init();

    let args = Args::parse();
    let settings = Settings::from_env().context("loading settings")?;

    tracing::info!("Llama Stack: {}", settings.base_url());
    tracing::info!("Vector DB: {}", settings.vector_db_id);
    tracing::info!(
        "Model: {} (top_k={}, score_threshold={})",
        settings.llm_model_id,
        settings.rag_top_k,
        settings.rag_score_threshold
    );

    let state = Arc::new(AppState::new(settings));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("binding {}:{}", args.host, args.port))?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
