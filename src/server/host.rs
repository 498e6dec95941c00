//! Server host for transport-agnostic API exposure
//!
//! The host owns everything an exposure needs: the configuration, the shared
//! catalog state and the registry of resource routes.

use crate::catalog::{BrandDescriptor, CatalogState, CategoryDescriptor, ProductDescriptor};
use crate::config::CatalogConfig;
use crate::server::entity_registry::EntityRegistry;
use anyhow::Result;
use std::sync::Arc;

pub struct ServerHost {
    pub config: Arc<CatalogConfig>,

    /// Services and upload store shared by the handlers
    pub state: CatalogState,

    /// Routes of every catalog resource
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    /// Build the host from builder components, registering the brand,
    /// category and product resources
    pub fn from_builder_components(config: CatalogConfig, state: CatalogState) -> Result<Self> {
        let mut entity_registry = EntityRegistry::new();
        entity_registry.register(Box::new(BrandDescriptor::new(state.clone())));
        entity_registry.register(Box::new(CategoryDescriptor::new(state.clone())));
        entity_registry.register(Box::new(ProductDescriptor::new(state.clone())));

        Ok(Self {
            config: Arc::new(config),
            state,
            entity_registry,
        })
    }

    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }
}
