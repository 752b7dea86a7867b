//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::services::{AppStartTime, health_routes, redirect_routes, urls_routes};
use crate::runtime::startup;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(allowed_origins: &[String]) {
    if allowed_origins.iter().any(|o| o == "*") && allowed_origins.len() > 1 {
        warn!(
            "CORS allowed_origins contains '*' alongside explicit origins; \
            '*' takes precedence and all origins will be allowed."
        );
    }
}

/// Build CORS middleware from configuration
///
/// An empty origin list keeps the browser's default same-origin policy.
fn build_cors_middleware(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE"])
        .allowed_header(actix_web::http::header::CONTENT_TYPE)
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server
///
/// This function:
/// 1. Records startup time
/// 2. Prepares server components (storage, services)
/// 3. Configures and starts the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    // Record application start time
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    // Prepare server startup (storage, services)
    let startup_ctx = startup::prepare_server_startup().await.map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let store = startup_ctx.store.clone();
    let link_service = startup_ctx.link_service.clone();

    let config = crate::config::get_config();
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let cpu_count = config.server.cpu_count.min(32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let allowed_origins = config.server.cors_allowed_origins.clone();
    validate_cors_config(&allowed_origins);

    warn!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        // Build CORS middleware
        let cors = build_cors_middleware(&allowed_origins);

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .service(urls_routes())
            .service(health_routes())
            // redirect scope has a catch-all route, must be registered last
            .service(redirect_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count)
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
