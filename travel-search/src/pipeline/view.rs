//! Composition of filtering and sorting into the displayed view.

use std::sync::Arc;

use crate::domain::Offer;

use super::filter::filter;
use super::sort::{SortKey, sort};
use super::spec::FilterSpec;

/// Filter then sort: the list the consumer actually shows.
pub fn derive_view(results: &[Arc<Offer>], spec: &FilterSpec, key: SortKey) -> Vec<Arc<Offer>> {
    sort(&filter(results, spec), key)
}
