use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chat_relay::config::Config;
use chat_relay::llm::Provider;
use chat_relay::server::{AppState, build_app};

#[derive(Parser)]
#[command(name = "chat-relay", version, about = "Relay chat turns to an LLM provider")]
struct Args {
    /// Path to the YAML config file (optional; defaults apply if missing)
    #[arg(short, long, default_value = "chat-relay.yaml")]
    config: PathBuf,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .await
        .with_context(|| format!("loading {}", args.config.display()))?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    check_service(&config);

    let state = AppState::from_config(&config);
    let app = build_app(state, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        %addr,
        base_path = %config.server.base_path,
        service = %config.relay.service,
        development = config.relay.development,
        "Chat relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Chat relay stopped");
    Ok(())
}

/// Requests will still fail per call; this only surfaces the problem early.
fn check_service(config: &Config) {
    match config.relay.service.parse::<Provider>() {
        Ok(provider) if config.credentials.api_key(provider).is_none() => {
            warn!(
                %provider,
                env_var = provider.api_key_env(),
                "Selected provider has no API key"
            );
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "AI_SERVICE does not name a supported provider"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down");
}
