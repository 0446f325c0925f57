//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

use super::startup::prepare_server_startup;
use crate::config::StaticConfig;

pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let services = prepare_server_startup(config).await?;

    let cpu_count = config.server.cpu_count.max(1);
    warn!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(Compress::default())
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(move |cfg| services.configure(cfg))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    // actix 自带 SIGINT/SIGTERM 处理，收到信号后优雅关闭
    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    info!("Server stopped");
    Ok(())
}
