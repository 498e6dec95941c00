//! Service traits for catalog storage

use crate::core::entity::Entity;
use crate::core::store::{CollectionQuery, Lookup, ProductQuery};
use crate::entities::Product;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing brands and categories
///
/// Implementations are agnostic of the HTTP layer; they receive explicit
/// query specifications and return plain entities.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Store a new entity
    async fn create(&self, entity: T) -> Result<T>;

    /// List the whole collection in the requested order
    async fn find(&self, query: &CollectionQuery) -> Result<Vec<T>>;

    /// Fetch one entity by id or slug
    async fn find_one(&self, lookup: &Lookup) -> Result<Option<T>>;

    /// Replace the entity stored under `id`, returning the previous version
    ///
    /// Returns `None` (and stores nothing) when no entity has that id.
    async fn replace(&self, id: &Uuid, entity: T) -> Result<Option<T>>;

    /// Remove the entity stored under `id`, returning it
    async fn delete(&self, id: &Uuid) -> Result<Option<T>>;
}

/// Service trait for reading products into listings
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Store a new product
    async fn create(&self, product: Product) -> Result<Product>;

    /// Fetch every product matching `query`, materialized as listings
    /// expect (variants cheapest first, comments filtered)
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>>;
}
