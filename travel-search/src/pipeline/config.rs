//! Defaults for the filter state.

use crate::domain::{InvalidPriceRange, OfferKind, PriceRange};

use super::sort::SortKey;
use super::spec::FilterSpec;

/// Starting point for a fresh filter state and the target of `clear`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Price range a cleared filter admits.
    pub default_price_range: PriceRange,

    /// Sort key a new session starts with. Clearing filters does not reset it.
    pub default_sort: SortKey,
}

impl FilterConfig {
    /// Create a configuration admitting prices in `[0, max_price]`.
    pub fn new(max_price: f64, default_sort: SortKey) -> Result<Self, InvalidPriceRange> {
        Ok(Self {
            default_price_range: PriceRange::up_to(max_price)?,
            default_sort,
        })
    }

    /// A configuration whose cleared filter admits every price.
    pub fn unbounded() -> Self {
        Self {
            default_price_range: PriceRange::UNBOUNDED,
            default_sort: SortKey::Price,
        }
    }

    /// Defaults for one kind of offer.
    ///
    /// Bus fares sit under the bus page's 5000 slider ceiling; flights have no
    /// price filter by default, so nothing is hidden until one is set.
    pub fn for_kind(kind: OfferKind) -> Self {
        match kind {
            OfferKind::Bus => Self::default(),
            OfferKind::Flight => Self::unbounded(),
        }
    }

    /// Set the sort key new sessions start with.
    pub fn with_default_sort(mut self, key: SortKey) -> Self {
        self.default_sort = key;
        self
    }

    /// The filter spec a new or cleared session uses.
    pub fn default_spec(&self) -> FilterSpec {
        FilterSpec::with_price_range(self.default_price_range)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_price_range: PriceRange::default(), // 0..=5000
            default_sort: SortKey::Price,
        }
    }
}
