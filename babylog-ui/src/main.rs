//! babylog-ui - baby care log application service
//!
//! Serves the JSON API the daily-log form UI talks to. Storage backend
//! (local SQLite or remote REST table) is selected once at startup from
//! configuration; the API is backend-agnostic.

use anyhow::Result;
use babylog_common::config;
use babylog_common::identity::Session;
use babylog_common::store::Store;
use babylog_ui::{build_router, AppState};
use clap::Parser;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "babylog-ui", about = "Baby care log application service")]
struct Args {
    /// Data root folder (overrides BABYLOG_ROOT and the config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on
    #[arg(long, default_value_t = 5730)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Baby Log service (babylog-ui) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let root = config::resolve_root_folder(args.root_folder.as_deref());
    std::fs::create_dir_all(&root)?;
    info!("Data root: {}", root.display());

    let session = Arc::new(Session::load(root.join("session")));

    let remote = config::resolve_remote_config();
    let store = Arc::new(Store::open(&root, remote, Arc::clone(&session)).await?);

    let state = AppState::new(store, session);
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("babylog-ui listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
