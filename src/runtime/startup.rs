//! Startup wiring
//!
//! Opens storage and assembles the services shared by every worker.

use std::sync::Arc;

use actix_web::web;
use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::{self, JwtService};
use crate::config::StaticConfig;
use crate::services::{AnalyticsService, LinkService, RedirectService};
use crate::storage::{LinkStore, SeaOrmStorage, VisitLog, VisitQuery};

/// Shared application state, cloned into every actix worker.
#[derive(Clone)]
pub struct AppServices {
    pub storage: web::Data<SeaOrmStorage>,
    pub links: web::Data<LinkService>,
    pub redirects: web::Data<RedirectService>,
    pub analytics: web::Data<AnalyticsService>,
    pub jwt: web::Data<JwtService>,
}

impl AppServices {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        let link_store: Arc<dyn LinkStore> = storage.clone();
        let visit_log: Arc<dyn VisitLog> = storage.clone();
        let visit_query: Arc<dyn VisitQuery> = storage.clone();

        Self {
            links: web::Data::new(LinkService::new(link_store.clone())),
            redirects: web::Data::new(RedirectService::new(
                link_store,
                visit_log,
                config.analytics.visit_log,
            )),
            analytics: web::Data::new(AnalyticsService::new(visit_query, &config.analytics)),
            jwt: web::Data::new(JwtService::from_config(&config.auth)),
            storage: web::Data::from(storage),
        }
    }

    /// Register shared state and routes on an `App`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.storage.clone())
            .app_data(self.links.clone())
            .app_data(self.redirects.clone())
            .app_data(self.analytics.clone())
            .app_data(self.jwt.clone());
        api::configure(cfg);
    }
}

/// Open storage (running migrations) and build the services.
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<AppServices> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = SeaOrmStorage::new(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let services = AppServices::new(Arc::new(storage), config);

    info!(
        "Pre-startup processing completed in {} ms (visit log: {:?})",
        start_time.elapsed().as_millis(),
        config.analytics.visit_log
    );
    Ok(services)
}
