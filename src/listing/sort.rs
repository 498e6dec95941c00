//! Sort stage

use super::Listable;
use super::pricing::{derived_score, effective_price};
use crate::core::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

/// Orderings a listing can be requested in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most recently created first
    #[default]
    Newest,
    /// Highest total sales across variants first
    BestSeller,
    /// Highest derived score first
    Popular,
    /// Lowest effective price first
    Cheap,
    /// Highest effective price first
    Expensive,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::BestSeller => "best-seller",
            SortKey::Popular => "popular",
            SortKey::Cheap => "cheap",
            SortKey::Expensive => "expensive",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "newest" => Ok(SortKey::Newest),
            "best-seller" => Ok(SortKey::BestSeller),
            "popular" => Ok(SortKey::Popular),
            "cheap" => Ok(SortKey::Cheap),
            "expensive" => Ok(SortKey::Expensive),
            other => Err(ValidationError::field(
                "products-sort",
                format!("unknown sort key '{other}' (expected best-seller, popular, cheap, expensive or newest)"),
            )),
        }
    }
}

/// Return `items` in the order `key` asks for
///
/// Sorting is stable: items that compare equal keep their relative order.
pub fn sorted<T: Listable>(items: Vec<T>, key: SortKey, now: DateTime<Utc>) -> Vec<T> {
    match key {
        SortKey::Newest => {
            let mut items = items;
            items.sort_by_key(|item| Reverse(item.created_at()));
            items
        }
        SortKey::BestSeller => {
            let mut items = items;
            items.sort_by_key(|item| Reverse(item.variants().iter().map(|v| v.sales).sum::<u64>()));
            items
        }
        SortKey::Popular => sort_by_score(items, |item| derived_score(item.comment_scores()), |a, b| b.total_cmp(a)),
        SortKey::Cheap => sort_by_price(items, now, |a, b| a.total_cmp(b)),
        SortKey::Expensive => sort_by_price(items, now, |a, b| b.total_cmp(a)),
    }
}

/// Items without a price go last whichever direction is requested
fn sort_by_price<T: Listable>(items: Vec<T>, now: DateTime<Utc>, cmp: fn(&f64, &f64) -> Ordering) -> Vec<T> {
    let mut keyed: Vec<(Option<f64>, T)> = items
        .into_iter()
        .map(|item| (effective_price(&item, now), item))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, item)| item).collect()
}

fn sort_by_score<T: Listable>(
    items: Vec<T>,
    score: impl Fn(&T) -> f64,
    cmp: fn(&f64, &f64) -> Ordering,
) -> Vec<T> {
    let mut keyed: Vec<(f64, T)> = items.into_iter().map(|item| (score(&item), item)).collect();
    keyed.sort_by(|(a, _), (b, _)| cmp(a, b));
    keyed.into_iter().map(|(_, item)| item).collect()
}
