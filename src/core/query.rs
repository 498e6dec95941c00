//! Query parameters and pagination
//!
//! Query strings arrive as raw strings and are parsed into typed parameters
//! here, before any lookup runs. Malformed values are rejected with a
//! [`ValidationError`] naming the offending parameter.
//!
//! # Example
//! ```rust,ignore
//! // GET /brands?page=2&length=10
//! pub async fn list_brands(Query(raw): Query<RawCollectionQuery>) -> CatalogResult<Json<Page<Brand>>> {
//!     let pagination = raw.parse()?;
//!     // ...
//! }
//!
//! // GET /brands/apple?products-sort=cheap&products-price=0-500&products-page=1&products-length=20
//! ```

use crate::core::error::{CatalogResult, EntityError, ValidationError};
use crate::core::slug::Slug;
use crate::listing::{ListingParams, PriceRange, ProductFilter, SortKey};
use serde::{Deserialize, Serialize};

/// Which slice of a result to return
///
/// Pages start at 1. Without a length the whole result is one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub length: Option<usize>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            length: None,
        }
    }
}

impl Pagination {
    pub fn new(page: usize, length: Option<usize>) -> Self {
        Self {
            page: page.max(1),
            length: length.filter(|l| *l > 0),
        }
    }

    /// Cut `items` down to the requested page
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let size = self.length.unwrap_or(total);
        let start = self.page.saturating_sub(1).saturating_mul(size);
        let end = start.saturating_add(size);

        let items = items.into_iter().skip(start).take(size).collect();
        let next_page = (end < total).then_some(self.page + 1);

        Page {
            items,
            total,
            next_page,
            page: self.page,
        }
    }
}

/// One page of a result with its pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matching items before slicing
    pub total: usize,
    pub next_page: Option<usize>,
    #[serde(skip)]
    pub page: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            next_page: self.next_page,
            page: self.page,
        }
    }

    /// An empty page of a non-empty result means the caller asked past the end
    pub fn ensure_in_range(self) -> CatalogResult<Self> {
        if self.items.is_empty() && self.total > 0 {
            return Err(EntityError::PageOutOfRange {
                page: self.page,
                total: self.total,
            }
            .into());
        }
        Ok(self)
    }
}

/// Raw `?page&length` parameters of a collection listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCollectionQuery {
    pub page: Option<String>,
    pub length: Option<String>,
}

impl RawCollectionQuery {
    pub fn parse(&self) -> Result<Pagination, ValidationError> {
        Ok(Pagination::new(
            parse_page("page", self.page.as_deref())?,
            parse_length("length", self.length.as_deref())?,
        ))
    }
}

/// Raw product-listing parameters of a brand, category or global listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListingQuery {
    #[serde(rename = "products-brands")]
    pub brands: Option<String>,
    #[serde(rename = "products-categories")]
    pub categories: Option<String>,
    #[serde(rename = "products-price", alias = "products-range")]
    pub price: Option<String>,
    #[serde(rename = "only-available-products")]
    pub only_available: Option<String>,
    #[serde(rename = "only-amazing-products")]
    pub only_discounted: Option<String>,
    #[serde(rename = "products-sort")]
    pub sort: Option<String>,
    #[serde(rename = "products-page")]
    pub page: Option<String>,
    #[serde(rename = "products-length")]
    pub length: Option<String>,
}

/// Typed product-listing parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListingQuery {
    pub listing: ListingParams,
    /// Restrict to these brands (`None`: no restriction)
    pub brands: Option<Vec<Slug>>,
    /// Restrict to these categories (`None`: no restriction)
    pub categories: Option<Vec<Slug>>,
}

impl RawListingQuery {
    pub fn parse(&self) -> Result<ProductListingQuery, ValidationError> {
        let price = match self.price.as_deref().map(str::trim) {
            None | Some("") => PriceRange::default(),
            Some(raw) => raw.parse()?,
        };

        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => SortKey::default(),
            Some(raw) => raw.parse()?,
        };

        let filter = ProductFilter {
            price,
            only_available: parse_flag("only-available-products", self.only_available.as_deref())?,
            only_discounted: parse_flag("only-amazing-products", self.only_discounted.as_deref())?,
        };

        let pagination = Pagination::new(
            parse_page("products-page", self.page.as_deref())?,
            parse_length("products-length", self.length.as_deref())?,
        );

        Ok(ProductListingQuery {
            listing: ListingParams {
                filter,
                sort,
                pagination,
            },
            brands: self.brands.as_deref().and_then(Slug::parse_list),
            categories: self.categories.as_deref().and_then(Slug::parse_list),
        })
    }
}

fn parse_page(field: &str, raw: Option<&str>) -> Result<usize, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(value) => match value.parse::<usize>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(ValidationError::field(
                field,
                format!("'{value}' is not a positive page number"),
            )),
        },
    }
}

/// `0` and absence both mean "everything on one page"
fn parse_length(field: &str, raw: Option<&str>) -> Result<Option<usize>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<usize>()
            .map(|length| Some(length).filter(|l| *l > 0))
            .map_err(|_| ValidationError::field(field, format!("'{value}' is not a valid page length"))),
    }
}

fn parse_flag(field: &str, raw: Option<&str>) -> Result<bool, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") | Some("false") => Ok(false),
        Some("true") => Ok(true),
        Some(other) => Err(ValidationError::field(
            field,
            format!("'{other}' must be true or false"),
        )),
    }
}
