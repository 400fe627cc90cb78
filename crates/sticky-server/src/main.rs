mod config;

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{error, info};

use sticky_api::AppStateInner;
use sticky_db::Database;
use sticky_discord::DiscordClient;
use sticky_engine::{SqliteStore, StickyEngine};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sticky=debug,sticky_engine=debug,tower_http=debug".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            eprintln!("       Set it in your .env file and restart.");
            std::process::exit(1);
        }
    };

    let db = Arc::new(Database::open(&config.db_path)?);
    let store = Arc::new(SqliteStore::new(db));
    let platform = Arc::new(DiscordClient::new(&config.api_base, &config.bot_token)?);

    let engine = StickyEngine::start(platform, store, config.engine.clone()).await?;
    let sweeper = engine.spawn_draft_sweeper();

    let state = Arc::new(AppStateInner {
        engine: engine.clone(),
        ingress_token: config.ingress_token.clone(),
    });
    let app = sticky_api::router(state).layer(TraceLayer::new_for_http());

    info!(
        "Sticky server listening on {} ({} stickies, quiet interval {:?})",
        config.addr,
        engine.sticky_count().await,
        config.engine.quiet_interval
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    engine.shutdown();
    sweeper.abort();
    if let Err(e) = sweeper.await {
        if !e.is_cancelled() {
            error!("Draft sweeper failed: {}", e);
        }
    }

    info!("Sticky server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                error!("Could not install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
