// roswatch: Prometheus exporter for MikroTik RouterOS devices
//
// Connects to every configured routerboard at startup, then runs one
// collection cycle per scrape of /metrics. A device that was reachable
// once and went dark degrades gracefully; a device that was never
// reachable aborts startup.

mod expose;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use roswatch_core::{DeviceSession, Fleet, MetricsCollector};

/// Prometheus exporter for MikroTik RouterOS devices.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Listen port (overrides the config file's listen_port)
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] roswatch_config::ConfigError),

    #[error(transparent)]
    Connect(#[from] roswatch_core::CoreError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing();

    if let Err(err) = run(args).await {
        eprintln!("roswatch: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<(), RunError> {
    let config = roswatch_config::load_config(&args.config)?;
    let port = args.port.unwrap_or(config.listen_port);

    // Initial connects are sequential and fatal on failure: refusing to
    // start beats silently scraping a fleet that was misconfigured.
    let mut sessions = Vec::with_capacity(config.routerboards.len());
    for profile in &config.routerboards {
        let device = roswatch_config::to_device_config(profile)?;
        sessions.push(DeviceSession::connect(device).await?);
    }
    info!(devices = sessions.len(), "all routerboards connected");

    let collector = Arc::new(MetricsCollector::new(Fleet::new(sessions)));

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(collector);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    info!("metrics endpoint: http://{addr}/metrics");
    axum::serve(listener, app).await?;
    Ok(())
}

/// One collection cycle per scrape.
async fn metrics_handler(State(collector): State<Arc<MetricsCollector>>) -> Response {
    let series = collector.collect_cycle().await;
    match expose::encode(&series) {
        Ok(body) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "metric encoding failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "metric encoding failed").into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn index_handler() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head><title>roswatch</title></head>
<body>
    <h1>roswatch</h1>
    <p>Prometheus exporter for MikroTik RouterOS devices.</p>
    <ul>
        <li><a href="/metrics">/metrics</a> - Prometheus metrics</li>
        <li><a href="/health">/health</a> - Health check</li>
    </ul>
</body>
</html>"#,
    )
}
