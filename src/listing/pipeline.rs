//! Filter → sort → paginate → reshape

use super::filter::ProductFilter;
use super::pricing::derived_score;
use super::sort::{SortKey, sorted};
use crate::core::entity::Entity;
use crate::core::query::{Page, Pagination};
use crate::entities::{Offer, Variant};
use chrono::{DateTime, Utc};

/// An item the listing pipeline can rank and reshape
pub trait Listable: Entity {
    /// The shape the item takes in a result page
    type Listed;

    /// Variants, cheapest first
    fn variants(&self) -> &[Variant];

    fn offer(&self) -> Option<&Offer>;

    /// Scores of the comments that count towards the derived score
    fn comment_scores(&self) -> impl Iterator<Item = f64> + '_;

    /// Replace raw comments with the derived `score`
    fn into_listed(self, score: f64) -> Self::Listed;
}

/// Typed parameters of one listing request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingParams {
    pub filter: ProductFilter,
    pub sort: SortKey,
    pub pagination: Pagination,
}

/// Run the whole pipeline over `items`, evaluating offers at `now`
///
/// `total` on the returned page counts every item that passed the filter.
pub fn run<T: Listable>(items: Vec<T>, params: &ListingParams, now: DateTime<Utc>) -> Page<T::Listed> {
    let candidates = items.len();
    let kept = params.filter.apply(items, now);
    tracing::debug!(
        candidates,
        kept = kept.len(),
        sort = %params.sort,
        page = params.pagination.page,
        "listing filtered"
    );

    let ordered = sorted(kept, params.sort, now);
    params.pagination.paginate(ordered).map(|item| {
        let score = derived_score(item.comment_scores());
        item.into_listed(score)
    })
}
