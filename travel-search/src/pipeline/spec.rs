//! Filter specification.

use std::collections::BTreeSet;

use crate::domain::{DepartureSlot, MinRating, OfferClass, PriceRange};

/// The active filter criteria.
///
/// Empty sets mean "no restriction" for that category. Within a set the
/// criteria are alternatives; across categories they must all hold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    /// Accepted classes (bus type, cabin).
    pub classes: BTreeSet<OfferClass>,

    /// Accepted departure bands.
    pub slots: BTreeSet<DepartureSlot>,

    /// Accepted prices, inclusive.
    pub price_range: PriceRange,

    /// Lowest acceptable effective rating.
    pub min_rating: MinRating,
}

impl FilterSpec {
    /// A spec with no class, slot or rating restriction and the given price range.
    pub fn with_price_range(price_range: PriceRange) -> Self {
        Self {
            price_range,
            ..Self::default()
        }
    }

    /// Add the class if absent, remove it if present.
    ///
    /// Returns whether the class is selected afterwards.
    pub fn toggle_class(&mut self, class: OfferClass) -> bool {
        if self.classes.remove(&class) {
            false
        } else {
            self.classes.insert(class);
            true
        }
    }

    /// Add the slot if absent, remove it if present.
    ///
    /// Returns whether the slot is selected afterwards.
    pub fn toggle_slot(&mut self, slot: DepartureSlot) -> bool {
        if self.slots.remove(&slot) {
            false
        } else {
            self.slots.insert(slot);
            true
        }
    }

    /// Number of categories that currently restrict results, relative to
    /// `defaults`.
    pub fn active_count(&self, defaults: &FilterSpec) -> usize {
        [
            !self.classes.is_empty(),
            !self.slots.is_empty(),
            self.price_range != defaults.price_range,
            !self.min_rating.is_unrestricted(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}
