use std::time::Instant;

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use serde::Serialize;
use tracing::{error, trace};

use crate::api::error_code::ErrorCode;
use crate::api::response::json_response;
use crate::storage::SeaOrmStorage;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: String,
    pub response_time_ms: u64,
}

/// `GET /health`
pub async fn health_check(storage: web::Data<SeaOrmStorage>) -> impl Responder {
    let start_time = Instant::now();
    trace!("Received health check request");

    let (status, code, state) = match storage.ping().await {
        Ok(()) => (StatusCode::OK, ErrorCode::Success, "healthy"),
        Err(e) => {
            error!("Storage health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                "unhealthy",
            )
        }
    };

    json_response(
        status,
        code,
        state,
        Some(HealthResponse {
            status: state,
            database: storage.backend_name().to_string(),
            response_time_ms: start_time.elapsed().as_millis() as u64,
        }),
    )
}
