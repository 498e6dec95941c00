//! Catalog entities: brands, categories and products

pub mod brand;
pub mod category;
pub mod product;

pub use brand::{Brand, BrandInput};
pub use category::{Category, CategoryInput};
pub use product::{Comment, ListedProduct, Offer, Product, Variant};
