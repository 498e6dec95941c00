//! Route descriptors for the catalog entities

use super::CatalogState;
use super::handlers::{create_entity, get_entity, list_entities, list_products, remove_entity, update_entity};
use crate::entities::{Brand, Category};
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

/// Descriptor for the Brand entity
///
/// `{key}` is a slug for reads and an id for writes.
pub struct BrandDescriptor {
    pub state: CatalogState,
}

impl BrandDescriptor {
    pub fn new(state: CatalogState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for BrandDescriptor {
    fn entity_type(&self) -> &str {
        "brand"
    }

    fn plural(&self) -> &str {
        "brands"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/brands", get(list_entities::<Brand>).post(create_entity::<Brand>))
            .route(
                "/brands/{key}",
                get(get_entity::<Brand>)
                    .put(update_entity::<Brand>)
                    .delete(remove_entity::<Brand>),
            )
            .with_state(self.state.clone())
    }
}

/// Descriptor for the Category entity
pub struct CategoryDescriptor {
    pub state: CatalogState,
}

impl CategoryDescriptor {
    pub fn new(state: CatalogState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CategoryDescriptor {
    fn entity_type(&self) -> &str {
        "category"
    }

    fn plural(&self) -> &str {
        "categories"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route(
                "/categories",
                get(list_entities::<Category>).post(create_entity::<Category>),
            )
            .route(
                "/categories/{key}",
                get(get_entity::<Category>)
                    .put(update_entity::<Category>)
                    .delete(remove_entity::<Category>),
            )
            .with_state(self.state.clone())
    }
}

/// Descriptor for the read-only global product listing
pub struct ProductDescriptor {
    pub state: CatalogState,
}

impl ProductDescriptor {
    pub fn new(state: CatalogState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for ProductDescriptor {
    fn entity_type(&self) -> &str {
        "product"
    }

    fn plural(&self) -> &str {
        "products"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/products", get(list_products))
            .with_state(self.state.clone())
    }
}
