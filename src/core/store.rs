//! Query specifications passed to storage services
//!
//! Services receive one of these objects and translate it into whatever
//! their backend understands. Every backend must give the same answer for
//! the same specification.

use crate::core::entity::Entity;
use crate::core::slug::Slug;
use crate::entities::Product;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// How a single brand or category is addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(Uuid),
    /// Case-insensitive match on the entity's English name
    Slug(Slug),
}

impl Lookup {
    pub fn id(id: Uuid) -> Self {
        Lookup::Id(id)
    }

    pub fn slug(raw: &str) -> Self {
        Lookup::Slug(Slug::new(raw))
    }

    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        match self {
            Lookup::Id(id) => entity.id() == *id,
            Lookup::Slug(slug) => slug.matches(entity.slug_source()),
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "{id}"),
            Lookup::Slug(slug) => write!(f, "{slug}"),
        }
    }
}

/// Ordering of a brand or category collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Specification for listing a whole collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    pub order: Order,
}

impl CollectionQuery {
    pub fn newest_first() -> Self {
        Self {
            order: Order::NewestFirst,
        }
    }

    /// Order `items` in memory (stable)
    pub fn apply<T: Entity>(&self, mut items: Vec<T>) -> Vec<T> {
        match self.order {
            Order::NewestFirst => items.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
            Order::OldestFirst => items.sort_by_key(|item| item.created_at()),
        }
        items
    }
}

/// The owner a product listing is scoped to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductScope {
    #[default]
    All,
    Brand(Uuid),
    Category(Uuid),
}

/// An additional restriction on the owning brand or category
///
/// An empty id list matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restriction {
    Brands(Vec<Uuid>),
    Categories(Vec<Uuid>),
}

impl Restriction {
    pub fn allows(&self, product: &Product) -> bool {
        match self {
            Restriction::Brands(ids) => ids.contains(&product.brand_id),
            Restriction::Categories(ids) => ids.contains(&product.category_id),
        }
    }
}

/// Specification for fetching the products a listing runs over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub scope: ProductScope,
    /// All restrictions must hold
    pub restrictions: Vec<Restriction>,
    /// Drop unconfirmed comments before they reach the score
    pub confirmed_comments_only: bool,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::all()
    }
}

impl ProductQuery {
    pub fn all() -> Self {
        Self {
            scope: ProductScope::All,
            restrictions: Vec::new(),
            confirmed_comments_only: true,
        }
    }

    pub fn for_brand(id: Uuid) -> Self {
        Self {
            scope: ProductScope::Brand(id),
            ..Self::all()
        }
    }

    pub fn for_category(id: Uuid) -> Self {
        Self {
            scope: ProductScope::Category(id),
            ..Self::all()
        }
    }

    pub fn restricted(mut self, restriction: Restriction) -> Self {
        self.restrictions.push(restriction);
        self
    }

    pub fn with_all_comments(mut self) -> Self {
        self.confirmed_comments_only = false;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        let in_scope = match self.scope {
            ProductScope::All => true,
            ProductScope::Brand(id) => product.brand_id == id,
            ProductScope::Category(id) => product.category_id == id,
        };
        in_scope && self.restrictions.iter().all(|r| r.allows(product))
    }

    /// Shape a stored product the way listings expect it: variants by
    /// ascending price, comments filtered as requested
    pub fn materialize(&self, mut product: Product) -> Product {
        product.variants.sort_by(|a, b| a.price.total_cmp(&b.price));
        if self.confirmed_comments_only {
            product.comments.retain(|c| c.is_confirmed);
        }
        product
    }
}
