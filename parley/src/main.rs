use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parley::api::{create_router, AppState};
use parley::config::Config;
use parley::relay::ChatRelay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    let default_filter = if config.server.debug {
        "parley=debug,tower_http=debug"
    } else {
        "parley=info,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.provider.selector.is_none() {
        tracing::warn!("AI_PROVIDER is not set, defaulting to anthropic");
    }

    let relay = ChatRelay::new(&config.provider)?;
    tracing::info!("Chat relay initialized with provider: {}", relay.kind());

    let state = AppState::new(config.clone(), relay);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Parley starting on http://{}", addr);
    tracing::info!("  Chat UI:      http://{}/", addr);
    tracing::info!("  Health check: http://{}/api/health", addr);

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

    tracing::info!("Shutdown signal received");
}
