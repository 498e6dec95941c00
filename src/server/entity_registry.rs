//! Entity registry collecting the route descriptors of the catalog

use axum::Router;
use indexmap::IndexMap;

/// Describes how to build the routes of one resource
///
/// Each catalog resource (brands, categories, products) implements this to
/// contribute its routes, already bound to their state.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "brand")
    fn entity_type(&self) -> &str;

    /// The plural form used as the route prefix (e.g., "brands")
    fn plural(&self) -> &str;

    /// Build the routes for this resource, rooted at `/{plural}`
    fn build_routes(&self) -> Router;
}

/// Registry of every exposed resource, in registration order
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: IndexMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor; a second one for the same entity type replaces
    /// the first
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        tracing::debug!(entity_type = %entity_type, plural = descriptor.plural(), "registering routes");
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge the routes of every registered resource
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| router.merge(descriptor.build_routes()))
    }

    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }

    pub fn plurals(&self) -> Vec<&str> {
        self.descriptors.values().map(|d| d.plural()).collect()
    }
}
