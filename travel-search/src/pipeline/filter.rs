//! Filtering of fetched offers against a filter specification.

use std::sync::Arc;

use crate::domain::Offer;

use super::spec::FilterSpec;

/// Whether a single offer satisfies every clause of the spec.
///
/// An offer passes when all of these hold:
/// 1. no classes are selected, or its class is one of them;
/// 2. no slots are selected, or its departure falls in one of them
///    (a malformed departure never does);
/// 3. its price is within the price range, inclusive;
/// 4. its effective rating is at least the rating floor.
pub fn matches(offer: &Offer, spec: &FilterSpec) -> bool {
    if !spec.classes.is_empty() && !spec.classes.contains(&offer.class) {
        return false;
    }

    if !spec.slots.is_empty() {
        let Some(time) = offer.departure.clock() else {
            return false;
        };
        if !spec.slots.iter().any(|slot| slot.contains(time)) {
            return false;
        }
    }

    if !spec.price_range.contains(offer.price) {
        return false;
    }

    spec.min_rating.admits(offer.effective_rating())
}

/// Offers that satisfy the spec, in their input order.
pub fn filter(results: &[Arc<Offer>], spec: &FilterSpec) -> Vec<Arc<Offer>> {
    results
        .iter()
        .filter(|offer| matches(offer, spec))
        .cloned()
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{DepartureSlot, MinRating, OfferClass, PriceRange};
    use crate::pipeline::testing::{CLASSES, offers_strategy};
    use proptest::prelude::*;

    fn spec_strategy() -> impl Strategy<Value = FilterSpec> {
        (
            prop::collection::btree_set(prop::sample::select(CLASSES.to_vec()), 0..3),
            prop::collection::btree_set(prop::sample::select(DepartureSlot::ALL.to_vec()), 0..4),
            (0u32..6000, 0u32..6000),
            0u32..=50,
        )
            .prop_map(|(classes, slots, (a, b), rating)| FilterSpec {
                classes: classes.into_iter().map(OfferClass::from).collect(),
                slots,
                price_range: PriceRange::new(f64::from(a.min(b)), f64::from(a.max(b))).unwrap(),
                min_rating: MinRating::new(f64::from(rating) / 10.0).unwrap(),
            })
    }

    proptest! {
        /// The output is a subsequence of the input.
        #[test]
        fn filter_is_ordered_subset(offers in offers_strategy(), spec in spec_strategy()) {
            let filtered = filter(&offers, &spec);
            let mut remaining = offers.iter();
            for kept in &filtered {
                prop_assert!(
                    remaining.any(|o| Arc::ptr_eq(o, kept)),
                    "{} is out of order or not from the input",
                    kept.id
                );
            }
        }

        #[test]
        fn filter_is_idempotent(offers in offers_strategy(), spec in spec_strategy()) {
            let once = filter(&offers, &spec);
            let twice = filter(&once, &spec);
            prop_assert_eq!(once, twice);
        }

        /// Every kept offer matches and every dropped offer does not.
        #[test]
        fn filter_agrees_with_predicate(offers in offers_strategy(), spec in spec_strategy()) {
            let filtered = filter(&offers, &spec);
            let expected = offers.iter().filter(|o| matches(o, &spec)).count();
            prop_assert_eq!(filtered.len(), expected);
        }

        #[test]
        fn unrestricted_spec_is_identity(offers in offers_strategy()) {
            let affordable: Vec<_> = offers.into_iter().filter(|o| o.price <= 5000.0).collect();
            let spec = FilterSpec::with_price_range(PriceRange::new(0.0, 5000.0).unwrap());
            prop_assert_eq!(filter(&affordable, &spec), affordable);
        }
    }
}
