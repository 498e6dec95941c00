//! Storefront catalog server
//!
//! Configuration comes from the YAML file named by `STOREFRONT_CONFIG`
//! (defaults when unset); log filtering from `RUST_LOG` (default `info`).

use anyhow::Result;
use storefront::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = CatalogConfig::load()?;
    tracing::info!(
        bind = %config.server.bind,
        backend = ?config.storage.backend,
        uploads = %config.uploads.root.display(),
        "starting storefront catalog"
    );

    match config.storage.backend {
        StorageBackend::InMemory => {
            run(
                config,
                InMemoryDataService::<Brand>::new(),
                InMemoryDataService::<Category>::new(),
                InMemoryProductService::new(),
            )
            .await
        }
        StorageBackend::Mongodb => run_mongodb(config).await,
    }
}

#[cfg(feature = "mongodb_backend")]
async fn run_mongodb(config: CatalogConfig) -> Result<()> {
    let uri = config
        .storage
        .uri
        .clone()
        .ok_or_else(|| anyhow::anyhow!("storage.uri is required for the mongodb backend"))?;
    let client = mongodb::Client::with_uri_str(&uri).await?;
    let database = client.database(&config.storage.database);

    run(
        config,
        MongoDataService::<Brand>::new(database.clone()),
        MongoDataService::<Category>::new(database.clone()),
        MongoProductService::new(database),
    )
    .await
}

#[cfg(not(feature = "mongodb_backend"))]
async fn run_mongodb(_config: CatalogConfig) -> Result<()> {
    anyhow::bail!("storage.backend is mongodb but this binary was built without the mongodb_backend feature")
}

async fn run<B, C, P>(config: CatalogConfig, brands: B, categories: C, products: P) -> Result<()>
where
    B: DataService<Brand> + Clone + 'static,
    C: DataService<Category> + Clone + 'static,
    P: ProductService + Clone + 'static,
{
    if let Some(path) = &config.storage.seed {
        SeedData::from_json_file(path)?
            .load_into(&brands, &categories, &products)
            .await?;
    }

    let bind = config.server.bind.clone();
    ServerBuilder::new()
        .with_config(config)
        .with_brand_service(brands)
        .with_category_service(categories)
        .with_product_service(products)
        .serve(&bind)
        .await
}
