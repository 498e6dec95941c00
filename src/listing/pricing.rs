//! Price and score derivations shared by the filter and sort stages

use super::Listable;
use chrono::{DateTime, Utc};

/// Score every product starts from before any comment arrives
const NEUTRAL_SCORE: f64 = 5.0;

/// Price of the cheapest variant, `None` for an item without variants
pub fn base_price<T: Listable>(item: &T) -> Option<f64> {
    item.variants().first().map(|v| v.price)
}

/// Base price with the offer applied while it is active at `now`
pub fn effective_price<T: Listable>(item: &T, now: DateTime<Utc>) -> Option<f64> {
    let base = base_price(item)?;
    Some(match item.offer() {
        Some(offer) if offer.is_active(now) => offer.apply(base),
        _ => base,
    })
}

/// Mean of the scores with one neutral vote mixed in, to one decimal
pub fn derived_score(scores: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = scores.fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));
    round1((sum + NEUTRAL_SCORE) / (count as f64 + 1.0))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
