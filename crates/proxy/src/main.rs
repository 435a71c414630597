use alert_control_proxy::{router, AppState, ProxyConfig};
use alert_control_streamlabs::types::AlertState;
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Relays alert mute/suppress commands to Streamlabs.
#[derive(Debug, Parser)]
#[command(name = "alert-control-proxy", version)]
struct Args {
    /// Path to proxy.toml
    #[arg(long, env = "ALERT_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(ProxyConfig::default_path);
    let config = ProxyConfig::load_or_default(&config_path).with_env_overrides();
    let addr = config.socket_addr()?;

    let state = AppState::new(&config);
    tokio::spawn(log_state_changes(state.alerts.subscribe()));

    let listener = TcpListener::bind(addr).await?;
    info!("Proxy server running at http://{}", addr);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Proxy server stopped");
    Ok(())
}

async fn log_state_changes(mut rx: watch::Receiver<AlertState>) {
    while rx.changed().await.is_ok() {
        let state = *rx.borrow_and_update();
        info!(%state, "Alert state changed");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
