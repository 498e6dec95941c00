//! Startup seeding from a JSON document
//!
//! ```json
//! { "brands": [...], "categories": [...], "products": [...] }
//! ```
//!
//! Each array holds entities in their serialized (camelCase) form.

use crate::core::service::{DataService, ProductService};
use crate::entities::{Brand, Category, Product};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub brands: Vec<Brand>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl SeedData {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::from_json_str(&content).with_context(|| format!("Invalid seed file {}", path.display()))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert everything into the given services
    pub async fn load_into(
        self,
        brands: &dyn DataService<Brand>,
        categories: &dyn DataService<Category>,
        products: &dyn ProductService,
    ) -> Result<()> {
        let counts = (self.brands.len(), self.categories.len(), self.products.len());

        for brand in self.brands {
            brands.create(brand).await?;
        }
        for category in self.categories {
            categories.create(category).await?;
        }
        for product in self.products {
            products.create(product).await?;
        }

        tracing::info!(
            brands = counts.0,
            categories = counts.1,
            products = counts.2,
            "seeded catalog"
        );
        Ok(())
    }
}
