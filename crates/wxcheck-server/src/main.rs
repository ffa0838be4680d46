use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use wxcheck_core::Config;
use wxcheck_server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    wxcheck_core::init()?;

    let (config, _validation) = Config::load_validated()?;

    tracing::info!("Configuration:");
    tracing::info!("  place: {}", config.weather.place);
    tracing::info!("  lang: {}", config.weather.lang.code());
    tracing::info!("  feed: {}", config.weather.feed_base_url);
    tracing::info!("  static: {}", config.server.static_dir.display());

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let host: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid host: {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Your app is listening on port {}", listener.local_addr()?.port());

    axum::serve(listener, app).await?;

    Ok(())
}
