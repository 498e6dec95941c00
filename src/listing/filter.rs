//! Filter stage: price range, stock and offer predicates

use super::Listable;
use super::pricing::effective_price;
use crate::core::error::ValidationError;
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Inclusive price bounds, `0..=∞` by default
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }
}

/// Parses `min-max`; either bound may be left empty
impl FromStr for PriceRange {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| ValidationError::field("products-price", format!("'{raw}' {message}"));

        let (min, max) = raw
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("is not a min-max range"))?;

        let bound = |value: &str, default: f64| -> Result<f64, ValidationError> {
            let value = value.trim();
            if value.is_empty() {
                return Ok(default);
            }
            match value.parse::<f64>() {
                Ok(n) if n.is_nan() => Err(invalid("has a non-numeric bound")),
                Ok(n) if n < 0.0 => Err(invalid("has a negative bound")),
                Ok(n) => Ok(n),
                Err(_) => Err(invalid("has a non-numeric bound")),
            }
        };

        let range = PriceRange::new(bound(min, 0.0)?, bound(max, f64::INFINITY)?);
        if range.min > range.max {
            return Err(invalid("has its minimum above its maximum"));
        }
        Ok(range)
    }
}

/// Predicates an item must satisfy to stay in a listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub price: PriceRange,
    /// Keep only items whose cheapest variant is in stock
    pub only_available: bool,
    /// Keep only items with an offer running at evaluation time
    pub only_discounted: bool,
}

impl ProductFilter {
    pub fn keep<T: Listable>(&self, item: &T, now: DateTime<Utc>) -> bool {
        let Some(price) = effective_price(item, now) else {
            tracing::debug!("excluding listing item without variants");
            return false;
        };

        if !self.price.contains(price) {
            return false;
        }

        if self.only_available && item.variants().first().is_some_and(|v| v.inventory == 0) {
            return false;
        }

        if self.only_discounted && !item.offer().is_some_and(|o| o.is_active(now)) {
            return false;
        }

        true
    }

    pub fn apply<T: Listable>(&self, items: Vec<T>, now: DateTime<Utc>) -> Vec<T> {
        items.into_iter().filter(|item| self.keep(item, now)).collect()
    }
}
