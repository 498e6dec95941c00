//! Brand and category endpoints
//!
//! Brands and categories share one set of generic handlers. What differs
//! between them (form fields, upload directory, how their products are
//! scoped) is described by [`CatalogEntity`].

pub mod descriptor;
pub mod form;
pub mod handlers;

use crate::core::entity::Entity;
use crate::core::service::{DataService, ProductService};
use crate::core::store::ProductQuery;
use crate::core::upload::{UploadKind, UploadStore};
use crate::entities::{Brand, BrandInput, Category, CategoryInput};
use form::FormFields;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub use descriptor::{BrandDescriptor, CategoryDescriptor, ProductDescriptor};
pub use handlers::{ItemListing, MessageBody};

/// Services shared by every catalog handler
#[derive(Clone)]
pub struct CatalogState {
    pub brands: Arc<dyn DataService<Brand>>,
    pub categories: Arc<dyn DataService<Category>>,
    pub products: Arc<dyn ProductService>,
    pub uploads: UploadStore,
}

/// An entity with a logo that is edited through multipart forms
pub trait CatalogEntity: Entity + Serialize {
    type Input: Validate + Send;

    /// Directory its logos are written to
    const UPLOAD_KIND: UploadKind;

    fn input(form: &FormFields) -> Self::Input;

    fn from_input(input: Self::Input, logo: String) -> Self;

    /// Apply edited fields, swapping the logo when a new one was uploaded
    fn apply(&mut self, input: Self::Input, logo: Option<String>);

    fn logo(&self) -> &str;

    /// Products belonging to the entity with this id
    fn products(id: Uuid) -> ProductQuery;

    fn service(state: &CatalogState) -> &Arc<dyn DataService<Self>>;
}

impl CatalogEntity for Brand {
    type Input = BrandInput;

    const UPLOAD_KIND: UploadKind = UploadKind::Brand;

    fn input(form: &FormFields) -> BrandInput {
        BrandInput {
            name: form.text("name"),
            english_name: form.text("englishName"),
        }
    }

    fn from_input(input: BrandInput, logo: String) -> Self {
        Brand::new(input.name, input.english_name, logo)
    }

    fn apply(&mut self, input: BrandInput, logo: Option<String>) {
        self.name = input.name;
        self.english_name = input.english_name;
        if let Some(logo) = logo {
            self.logo = logo;
        }
        self.touch();
    }

    fn logo(&self) -> &str {
        &self.logo
    }

    fn products(id: Uuid) -> ProductQuery {
        ProductQuery::for_brand(id)
    }

    fn service(state: &CatalogState) -> &Arc<dyn DataService<Self>> {
        &state.brands
    }
}

impl CatalogEntity for Category {
    type Input = CategoryInput;

    const UPLOAD_KIND: UploadKind = UploadKind::Category;

    fn input(form: &FormFields) -> CategoryInput {
        CategoryInput {
            title: form.text("title"),
            english_title: form.text("englishTitle"),
        }
    }

    fn from_input(input: CategoryInput, logo: String) -> Self {
        Category::new(input.title, input.english_title, logo)
    }

    fn apply(&mut self, input: CategoryInput, logo: Option<String>) {
        self.title = input.title;
        self.english_title = input.english_title;
        if let Some(logo) = logo {
            self.logo = logo;
        }
        self.touch();
    }

    fn logo(&self) -> &str {
        &self.logo
    }

    fn products(id: Uuid) -> ProductQuery {
        ProductQuery::for_category(id)
    }

    fn service(state: &CatalogState) -> &Arc<dyn DataService<Self>> {
        &state.categories
    }
}
