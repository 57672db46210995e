//! Native flock viewer
//!
//! Run with: cargo run --features native -- [--headless] [--server http://host:3000]
//!
//! Without `--server`, the endpoint comes from `FLOCK_WS` / `FLOCK_SERVER`.

use std::time::Duration;

use clap::Parser;
use flock_viewer::app::FlockApp;
use flock_viewer::core::config::ws_url_from_origin;
use flock_viewer::core::{ClientConfig, FlockClient};
use flock_viewer::time::{now_seconds, RateMeter};
use flock_viewer::websocket_native::NativeConnector;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "flock-viewer", about = "Live view and controls for a flocking simulation")]
struct Args {
    /// Log snapshot stats instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Simulation server origin, e.g. https://host:3000
    #[arg(long, value_name = "ORIGIN", value_parser = ws_url_from_origin)]
    server: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,flock_viewer=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();
    let config = match args.server {
        Some(endpoint) => ClientConfig::new(endpoint),
        None => ClientConfig::from_env(),
    };
    info!(url = %config.endpoint, headless = args.headless, "WebSocket URL resolved");

    if args.headless {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(run_headless(config));
        return Ok(());
    }

    let client = FlockClient::new(NativeConnector::new()?, config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Flock viewer")
            .with_inner_size([1180.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Flock viewer",
        options,
        Box::new(move |cc| Ok(Box::new(FlockApp::new(cc, client)))),
    )?;
    Ok(())
}

/// Observe the simulation without a window, logging stats every 5 seconds
async fn run_headless(config: ClientConfig) {
    let connector = NativeConnector::with_handle(tokio::runtime::Handle::current());
    let mut client = FlockClient::new(connector, config);
    client.start(now_seconds());

    let mut frame_interval = tokio::time::interval(Duration::from_millis(16));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));
    let mut snapshot_rate = RateMeter::new();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let now = now_seconds();
                client.tick(now);
                snapshot_rate.update(now, client.store().received());
            }
            _ = stats_interval.tick() => {
                let snapshot = client.snapshot();
                let transport = client.transport_stats();
                info!(
                    state = client.connection_state().label(),
                    arrows = snapshot.arrows.len(),
                    obstacles = snapshot.obstacles.len(),
                    "/sec" = format!("{:.1}", snapshot_rate.rate()),
                    malformed = transport.malformed,
                    connect_attempts = transport.connect_attempts,
                    "stats"
                );
            }
            _ = &mut shutdown => {
                warn!("Interrupted, shutting down");
                break;
            }
        }
    }
}
