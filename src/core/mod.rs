//! Core module containing fundamental traits and types for the service

pub mod entity;
pub mod error;
pub mod query;
pub mod service;
pub mod slug;
pub mod store;
pub mod upload;
pub mod validation;

pub use entity::Entity;
pub use error::{CatalogError, CatalogResult, EntityError, ValidationError};
pub use query::{Page, Pagination, ProductListingQuery, RawCollectionQuery, RawListingQuery};
pub use service::{DataService, ProductService};
pub use slug::Slug;
pub use store::{CollectionQuery, Lookup, Order, ProductQuery, ProductScope, Restriction};
pub use upload::{StoredFile, UploadKind, UploadStore, UploadedFile};
