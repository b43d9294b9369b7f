use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codecomplexity::api::{create_router, AppState};
use codecomplexity::config::{AnalysisFormat, Config};
use codecomplexity::llm::LlmProvider;

#[derive(Parser)]
#[command(name = "codecomplexity")]
#[command(about = "LLM-backed code complexity analysis service")]
struct Args {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Response format: `markdown` or `json` (overrides ANALYSIS_FORMAT)
    #[arg(long)]
    format: Option<AnalysisFormat>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "codecomplexity=info,tower_http=debug".into());
    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let format = args.format.unwrap_or_else(AnalysisFormat::from_env);
    let mut config = Config::for_format(format);
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!(
        "Initializing LLM client: {} (format={}, timeout={}s)...",
        config.llm.model,
        config.analysis.format,
        config.llm.timeout_secs
    );
    let llm = LlmProvider::new(&config.llm);
    if !llm.is_available() {
        tracing::warn!(
            "GROQ_API_KEY not found in environment variables. Analysis requests will fail until it is set."
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let endpoint = config.analysis.format.endpoint();

    let state = AppState::new(config, llm);
    let app = create_router(state);

    tracing::info!("CodeComplexity starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  Analysis:     POST http://{}{}", addr, endpoint);
    tracing::info!("  API docs:     http://{}/docs", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
}
