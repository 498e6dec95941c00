//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoDataService<T>` for brands and categories and
//! `MongoProductService` for products.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! storefront-catalog = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! One collection per entity type, named after `T::resource_name()`
//! ("brands", "categories", "products").
//!
//! # Serialization strategy
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. UUIDs and timestamps are stored as
//! strings. The `id` field is mapped to MongoDB's `_id` convention.
//! Collection ordering is applied after loading, from the parsed timestamps.

use crate::core::entity::Entity;
use crate::core::service::{DataService, ProductService};
use crate::core::store::{CollectionQuery, Lookup, ProductQuery, ProductScope, Restriction};
use crate::entities::Product;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain entity convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn uuid_list(ids: &[Uuid]) -> Vec<Bson> {
    ids.iter().map(uuid_bson).collect()
}

fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    let json = serde_json::to_value(value).map_err(|e| anyhow!("Failed to serialize entity: {}", e))?;
    json_to_document(json)
}

fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T> {
    serde_json::from_value(document_to_json(doc))
        .map_err(|e| anyhow!("Failed to deserialize entity from document: {}", e))
}

/// Translate a lookup into a MongoDB filter
///
/// Slugs become an anchored, case-insensitive regex on the entity's slug field.
fn lookup_filter<T: Entity>(lookup: &Lookup) -> Document {
    match lookup {
        Lookup::Id(id) => doc! { "_id": uuid_bson(id) },
        Lookup::Slug(slug) => {
            let field = T::slug_field();
            doc! { field: { "$regex": slug.pattern(), "$options": "i" } }
        }
    }
}

/// Translate a product query into a MongoDB filter
fn product_filter(query: &ProductQuery) -> Document {
    let mut clauses: Vec<Document> = Vec::new();

    match query.scope {
        ProductScope::All => {}
        ProductScope::Brand(id) => clauses.push(doc! { "brandId": uuid_bson(&id) }),
        ProductScope::Category(id) => clauses.push(doc! { "categoryId": uuid_bson(&id) }),
    }

    for restriction in &query.restrictions {
        clauses.push(match restriction {
            Restriction::Brands(ids) => doc! { "brandId": { "$in": uuid_list(ids) } },
            Restriction::Categories(ids) => doc! { "categoryId": { "$in": uuid_list(ids) } },
        });
    }

    match clauses.len() {
        0 => doc! {},
        1 => clauses.remove(0),
        _ => doc! { "$and": clauses },
    }
}

// ---------------------------------------------------------------------------
// MongoDataService<T>
// ---------------------------------------------------------------------------

/// Brand/category storage backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use storefront::storage::MongoDataService;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let db = client.database("storefront");
/// let brands = MongoDataService::<Brand>::new(db);
/// ```
#[derive(Clone, Debug)]
pub struct MongoDataService<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoDataService<T> {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Entity + Serialize + DeserializeOwned> MongoDataService<T> {
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }
}

#[async_trait]
impl<T: Entity + Serialize + DeserializeOwned> DataService<T> for MongoDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let doc = to_document(&entity)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create {}: {}", T::resource_name_singular(), e))?;

        Ok(entity)
    }

    async fn find(&self, query: &CollectionQuery) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .await
            .map_err(|e| anyhow!("Failed to list {}: {}", T::resource_name(), e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect {}: {}", T::resource_name(), e))?;

        let entities = docs.into_iter().map(from_document).collect::<Result<Vec<T>>>()?;
        Ok(query.apply(entities))
    }

    async fn find_one(&self, lookup: &Lookup) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(lookup_filter::<T>(lookup))
            .await
            .map_err(|e| anyhow!("Failed to get {}: {}", T::resource_name_singular(), e))?;

        doc.map(from_document).transpose()
    }

    /// Replace atomically; the driver hands back the document as it was
    /// before the replacement
    async fn replace(&self, id: &Uuid, entity: T) -> Result<Option<T>> {
        let doc = to_document(&entity)?;

        let previous = self
            .collection()
            .find_one_and_replace(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(|e| anyhow!("Failed to update {}: {}", T::resource_name_singular(), e))?;

        previous.map(from_document).transpose()
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<T>> {
        let removed = self
            .collection()
            .find_one_and_delete(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete {}: {}", T::resource_name_singular(), e))?;

        removed.map(from_document).transpose()
    }
}

// ---------------------------------------------------------------------------
// MongoProductService
// ---------------------------------------------------------------------------

/// Product storage backed by MongoDB.
///
/// Scope and restrictions are evaluated by the server; variant ordering and
/// comment filtering happen after loading.
#[derive(Clone, Debug)]
pub struct MongoProductService {
    database: Database,
}

impl MongoProductService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("products")
    }
}

#[async_trait]
impl ProductService for MongoProductService {
    async fn create(&self, product: Product) -> Result<Product> {
        self.collection()
            .insert_one(to_document(&product)?)
            .await
            .map_err(|e| anyhow!("Failed to create product: {}", e))?;

        Ok(product)
    }

    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let cursor = self
            .collection()
            .find(product_filter(query))
            .await
            .map_err(|e| anyhow!("Failed to list products: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect products: {}", e))?;

        docs.into_iter()
            .map(|doc| from_document::<Product>(doc).map(|p| query.materialize(p)))
            .collect()
    }
}
