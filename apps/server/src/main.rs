//! content-resolver: HTTP service composing content pages from the
//! content and statistics backends.

mod cli;
mod request_id;
mod routes;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tracing::info;

use content_resolver_gateway::HttpGateway;
use content_resolver_shared::{EngineConfig, GatewayConfig};

use cli::Cli;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    cli::init_tracing(&cli);

    let config = cli.resolve_config()?;
    let gateway_config = GatewayConfig::try_from(&config)?;
    let state = AppState {
        gateway: HttpGateway::new(&gateway_config)?,
        engine: EngineConfig::from(&config),
    };

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .wrap_err_with(|| format!("binding {}", config.server.bind_addr))?;

    info!(
        bind_addr = %config.server.bind_addr,
        zebedee_url = %gateway_config.zebedee_url,
        babbage_url = ?gateway_config.babbage_url.as_ref().map(|u| u.as_str()),
        "starting server"
    );

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
