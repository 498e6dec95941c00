//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`
//! with health checks, the catalog routes, uploaded files under `/public`
//! and any custom routes.

use super::super::host::ServerHost;
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Room left in a request body for the text fields next to the logo
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let health_routes = Self::health_routes();
        let entity_routes = host.entity_registry.build_routes();
        let files = ServeDir::new(&host.config.uploads.root);

        let mut app = health_routes
            .merge(entity_routes)
            .nest_service("/public", files);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        let body_limit = host.config.uploads.max_bytes.saturating_add(FORM_OVERHEAD_BYTES);

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        ))
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "storefront"
        }))
    }
}
