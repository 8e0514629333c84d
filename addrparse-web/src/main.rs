//! Servidor web Axum com WebSocket: cole um texto e veja o endereço estruturado em tempo real

mod app;
mod config;
mod error;

use std::sync::Arc;

use addrparse_core::{AddressParser, ParserOptions};
use anyhow::Context;
use tracing::info;

use crate::app::{build_router, AppState};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    let parser = AddressParser::new().with_options(ParserOptions {
        name_max_graphemes: config.name_max_graphemes,
    });
    let bind = config.bind.clone();
    let app = build_router(Arc::new(AppState { parser, config }));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("não foi possível escutar em {bind}"))?;
    info!("🚀 Servidor de endereços iniciado em http://{bind}");
    axum::serve(listener, app).await.context("servidor encerrado com erro")?;
    Ok(())
}
