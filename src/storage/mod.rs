//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;
pub mod seed;

pub use in_memory::{InMemoryDataService, InMemoryProductService};
#[cfg(feature = "mongodb_backend")]
pub use self::mongodb::{MongoDataService, MongoProductService};
pub use seed::SeedData;
