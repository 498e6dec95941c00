//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::catalog::CatalogState;
use crate::config::CatalogConfig;
use crate::core::service::{DataService, ProductService};
use crate::core::upload::UploadStore;
use crate::entities::{Brand, Category};
use crate::storage::{InMemoryDataService, InMemoryProductService};
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(CatalogConfig::load()?)
///     .with_in_memory_storage()
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: CatalogConfig,
    brands: Option<Arc<dyn DataService<Brand>>>,
    categories: Option<Arc<dyn DataService<Category>>>,
    products: Option<Arc<dyn ProductService>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: CatalogConfig::default(),
            brands: None,
            categories: None,
            products: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the brand service (required)
    pub fn with_brand_service(mut self, service: impl DataService<Brand> + 'static) -> Self {
        self.brands = Some(Arc::new(service));
        self
    }

    /// Set the category service (required)
    pub fn with_category_service(mut self, service: impl DataService<Category> + 'static) -> Self {
        self.categories = Some(Arc::new(service));
        self
    }

    /// Set the product service (required)
    pub fn with_product_service(mut self, service: impl ProductService + 'static) -> Self {
        self.products = Some(Arc::new(service));
        self
    }

    /// Use fresh in-memory services for all three resources
    pub fn with_in_memory_storage(self) -> Self {
        self.with_brand_service(InMemoryDataService::<Brand>::new())
            .with_category_service(InMemoryDataService::<Category>::new())
            .with_product_service(InMemoryProductService::new())
    }

    /// Add routes that don't belong to a catalog resource
    ///
    /// # Example
    ///
    /// ```ignore
    /// let admin = Router::new().route("/admin/reindex", post(reindex));
    ///
    /// ServerBuilder::new()
    ///     .with_in_memory_storage()
    ///     .with_custom_routes(admin)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let brands = self
            .brands
            .take()
            .ok_or_else(|| anyhow!("Brand service is required. Call .with_brand_service()"))?;
        let categories = self
            .categories
            .take()
            .ok_or_else(|| anyhow!("Category service is required. Call .with_category_service()"))?;
        let products = self
            .products
            .take()
            .ok_or_else(|| anyhow!("Product service is required. Call .with_product_service()"))?;

        let state = CatalogState {
            brands,
            categories,
            products,
            uploads: UploadStore::new(&self.config.uploads),
        };

        ServerHost::from_builder_components(self.config, state)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds `addr`, serves until SIGTERM or Ctrl+C, then drains in-flight
    /// requests.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C, or on SIGTERM where signals exist
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, starting graceful shutdown...");
        },
    }
}
