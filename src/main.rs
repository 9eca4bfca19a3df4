//! Orbit API server.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                    ORBIT API                     │
//!                     │                                                  │
//!   Client Request    │  ┌────────────┐   ┌──────────────┐               │
//!   ──────────────────┼─▶│ request id │──▶│ trace/timeout│               │
//!                     │  └────────────┘   └──────┬───────┘               │
//!                     │                          │                       │
//!                     │          ┌───────────────┴──────────────┐        │
//!                     │          ▼                              ▼        │
//!                     │  ┌──────────────┐              ┌──────────────┐  │
//!                     │  │ /api/*       │              │ /edge/*      │  │
//!                     │  │ origin guard │              │ edge handler │  │
//!                     │  │ (GET POST    │              │ (GET POST    │  │
//!                     │  │  DELETE OPT) │              │  OPTIONS)    │  │
//!                     │  └──────┬───────┘              └──────────────┘  │
//!                     │         ▼                                        │
//!                     │  ┌──────────────┐                                │
//!                     │  │ bearer token │  401 on any failure            │
//!                     │  │ authority    │                                │
//!                     │  └──────┬───────┘                                │
//!                     │         ▼                                        │
//!   Client Response   │  ┌──────────────┐                                │
//!   ◀─────────────────┼──│   handlers   │                                │
//!                     │  └──────────────┘                                │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use orbit_api::config::load_or_default;
use orbit_api::http::{AppState, HttpServer};
use orbit_api::lifecycle::{signals::wait_for_signal, Shutdown};
use orbit_api::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "orbit-api")]
#[command(about = "Authorization and CORS boundary for the Orbit site API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "ORBIT_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_or_default(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("orbit-api v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    // Fail fast: no signing secret, no server.
    let state = match AppState::from_env(&config.auth) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to start without a signing secret");
            return Err(e.into());
        }
    };

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config, state).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
