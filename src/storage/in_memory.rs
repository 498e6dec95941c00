//! In-memory storage for testing, development and seeded demos

use crate::core::entity::Entity;
use crate::core::service::{DataService, ProductService};
use crate::core::store::{CollectionQuery, Lookup, ProductQuery};
use crate::entities::Product;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory brand/category service
///
/// Entities are kept in insertion order, so collections that compare equal on
/// `created_at` list in a stable order. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryDataService<T: Entity> {
    entities: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: Entity> InMemoryDataService<T> {
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entities.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn find(&self, query: &CollectionQuery) -> Result<Vec<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(query.apply(entities.values().cloned().collect()))
    }

    async fn find_one(&self, lookup: &Lookup) -> Result<Option<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(match lookup {
            Lookup::Id(id) => entities.get(id).cloned(),
            Lookup::Slug(_) => entities.values().find(|e| lookup.matches(*e)).cloned(),
        })
    }

    async fn replace(&self, id: &Uuid, entity: T) -> Result<Option<T>> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entities
            .get_mut(id)
            .map(|slot| std::mem::replace(slot, entity)))
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<T>> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entities.shift_remove(id))
    }
}

/// In-memory product service
#[derive(Clone, Default)]
pub struct InMemoryProductService {
    products: Arc<RwLock<IndexMap<Uuid, Product>>>,
}

impl InMemoryProductService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductService for InMemoryProductService {
    async fn create(&self, product: Product) -> Result<Product> {
        let mut products = self
            .products
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let products = self
            .products
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(products
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .map(|p| query.materialize(p))
            .collect())
    }
}
