//! Catalog listing pipeline
//!
//! Turns a materialized set of products into one result page:
//!
//! ```text
//! items ──filter──▶ kept ──sort──▶ ordered ──paginate──▶ slice ──reshape──▶ Page<Listed>
//! ```
//!
//! Every stage works on owned data and the evaluation instant is passed in
//! explicitly, so a listing is a pure function of its inputs.

pub mod filter;
pub mod pipeline;
pub mod pricing;
pub mod sort;

pub use filter::{PriceRange, ProductFilter};
pub use pipeline::{Listable, ListingParams, run};
pub use pricing::{base_price, derived_score, effective_price};
pub use sort::{SortKey, sorted};
