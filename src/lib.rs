//! # Storefront Catalog
//!
//! The catalog service of an e-commerce storefront: brands, categories and
//! the product listings shown on their pages, exposed over REST.
//!
//! ## Features
//!
//! - **Listing pipeline**: filter → sort → paginate → reshape, generic over
//!   any [`listing::Listable`] item and deterministic in its evaluation time
//! - **Typed query parameters**: malformed query strings are rejected before
//!   any lookup runs
//! - **Slug lookups**: `/brands/north-face` finds the brand named "North Face"
//! - **Upload hygiene**: logos written for failed writes, replaced logos and
//!   deleted entities' logos are removed from disk
//! - **Pluggable storage**: in-memory by default, MongoDB behind the
//!   `mongodb_backend` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_config(CatalogConfig::load()?)
//!         .with_in_memory_storage()
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod entities;
pub mod listing;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::Entity,
        error::{CatalogError, CatalogResult, ConfigError, EntityError, StorageError, ValidationError},
        query::{Page, Pagination, ProductListingQuery, RawCollectionQuery, RawListingQuery},
        service::{DataService, ProductService},
        slug::Slug,
        store::{CollectionQuery, Lookup, Order, ProductQuery, ProductScope, Restriction},
        upload::{UploadKind, UploadStore},
    };

    // === Entities ===
    pub use crate::entities::{
        Brand, BrandInput, Category, CategoryInput, Comment, ListedProduct, Offer, Product, Variant,
    };

    // === Listing ===
    pub use crate::listing::{Listable, ListingParams, PriceRange, ProductFilter, SortKey};

    // === Catalog ===
    pub use crate::catalog::{CatalogEntity, CatalogState, ItemListing, MessageBody};

    // === Configuration ===
    pub use crate::config::{CatalogConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, RestExposure, ServerBuilder, ServerHost};

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, InMemoryProductService, SeedData};

    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::{MongoDataService, MongoProductService};

    // === External re-exports ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
