mod config;
mod error;
mod server;

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, Transport};
use server::StockGlossaryServer;
use stockpick_core::glossary::Glossary;
use stockpick_core::guides::GuideCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC on stdio
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting stockpick-glossary MCP server");

    let config = Config::from_env()?;
    info!(
        transport = ?config.transport,
        search_limit = config.search_limit,
        "configuration loaded"
    );

    let glossary = Arc::new(Glossary::builtin().map_err(error::AppError::from)?);
    let guides = Arc::new(GuideCatalog::builtin().map_err(error::AppError::from)?);
    info!(
        terms = glossary.len(),
        categories = glossary.categories().len(),
        guides = guides.guides().len(),
        dataset_version = %glossary.digest(),
        "glossary loaded"
    );

    let server = StockGlossaryServer::new(glossary, guides, config.search_limit);

    match config.transport {
        Transport::Tcp(addr) => {
            let listener = TcpListener::bind(addr).await?;
            info!(listen_addr = %addr, "MCP server ready, serving on TCP");
            loop {
                let (stream, peer) = listener.accept().await?;
                let server = server.clone();
                tokio::spawn(async move {
                    info!(peer = %peer, "MCP client connected");
                    let service = server.serve(stream).await.inspect_err(|e| {
                        tracing::error!(error = %e, "MCP server error");
                    })?;
                    service.waiting().await?;
                    info!(peer = %peer, "MCP client disconnected");
                    Ok::<(), anyhow::Error>(())
                });
            }
        }
        Transport::Http { addr, path } => {
            let service = StreamableHttpService::new(
                move || Ok(server.clone()),
                LocalSessionManager::default().into(),
                Default::default(),
            );
            let router = axum::Router::new().nest_service(&path, service);
            let listener = TcpListener::bind(addr).await?;
            info!(listen_addr = %addr, path = %path, "MCP server ready, serving on HTTP");
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!(error = %e, "failed to listen for shutdown signal");
                    }
                })
                .await?;
            info!("MCP server shut down");
        }
        Transport::Stdio => {
            info!("MCP server ready, serving on stdio");
            let service = server.serve(stdio()).await.inspect_err(|e| {
                tracing::error!(error = %e, "MCP server error");
            })?;
            service.waiting().await?;
            info!("MCP server shut down");
        }
    }
    Ok(())
}
