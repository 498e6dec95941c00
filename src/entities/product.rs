//! Product entity and its nested documents

use crate::core::entity::Entity;
use crate::listing::Listable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchasable variant of a product (a colour, a size...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub name: String,
    pub code: String,
    pub price: f64,
    pub sales: u64,
    pub inventory: u64,
}

impl Variant {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            code: String::new(),
            price,
            sales: 0,
            inventory: 0,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_sales(mut self, sales: u64) -> Self {
        self.sales = sales;
        self
    }

    pub fn with_inventory(mut self, inventory: u64) -> Self {
        self.inventory = inventory;
        self
    }
}

/// A time-limited percentage discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub percent: f64,
    pub expires_at: DateTime<Utc>,
}

impl Offer {
    pub fn new(percent: f64, expires_at: DateTime<Utc>) -> Self {
        Self { percent, expires_at }
    }

    /// An offer applies only while its expiry is strictly in the future
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Discounted form of `price`
    pub fn apply(&self, price: f64) -> f64 {
        price * (1.0 - self.percent / 100.0)
    }
}

/// A customer review; only its score takes part in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub score: f64,
    #[serde(default)]
    pub is_confirmed: bool,
}

impl Comment {
    pub fn confirmed(score: f64) -> Self {
        Self {
            score,
            is_confirmed: true,
        }
    }

    pub fn pending(score: f64) -> Self {
        Self {
            score,
            is_confirmed: false,
        }
    }
}

/// A product as stored, with every nested document populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub covers: Vec<String>,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub offer: Option<Offer>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(title: impl Into<String>, brand_id: Uuid, category_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            covers: Vec::new(),
            brand_id,
            category_id,
            variants: Vec::new(),
            offer: None,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn with_offer(mut self, offer: Offer) -> Self {
        self.offer = Some(offer);
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.covers.push(cover.into());
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }
}

impl Entity for Product {
    fn resource_name() -> &'static str {
        "products"
    }

    fn resource_name_singular() -> &'static str {
        "product"
    }

    fn slug_field() -> &'static str {
        "title"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn slug_source(&self) -> &str {
        &self.title
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A product as it appears in a listing: comments folded into `score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedProduct {
    pub id: Uuid,
    pub title: String,
    pub covers: Vec<String>,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub variants: Vec<Variant>,
    pub offer: Option<Offer>,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

impl Listable for Product {
    type Listed = ListedProduct;

    fn variants(&self) -> &[Variant] {
        &self.variants
    }

    fn offer(&self) -> Option<&Offer> {
        self.offer.as_ref()
    }

    fn comment_scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.comments.iter().map(|c| c.score)
    }

    fn into_listed(self, score: f64) -> ListedProduct {
        ListedProduct {
            id: self.id,
            title: self.title,
            covers: self.covers,
            brand_id: self.brand_id,
            category_id: self.category_id,
            variants: self.variants,
            offer: self.offer,
            score,
            created_at: self.created_at,
        }
    }
}
