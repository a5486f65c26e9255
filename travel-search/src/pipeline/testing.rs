//! Proptest strategies shared by the pipeline tests.

use std::sync::Arc;

use proptest::prelude::*;

use crate::domain::{Offer, OfferKind};

pub(crate) const CLASSES: [&str; 3] = ["AC Sleeper", "Non-AC Seater", "AC Semi-Sleeper"];

/// Lists of bus offers with unique ids and deliberately coarse field values,
/// so that ties under every sort key are common. Some departures are
/// malformed.
pub(crate) fn offers_strategy() -> impl Strategy<Value = Vec<Arc<Offer>>> {
    prop::collection::vec(
        (
            0u32..20,
            prop::option::of(0u32..=50),
            prop::sample::select(CLASSES.to_vec()),
            prop::option::of((0u32..24, prop::sample::select(vec![0u32, 30]))),
            prop::option::of(prop::sample::select(vec![180u32, 360, 420])),
        ),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (price, rating, class, departure, duration))| {
                let departure = match departure {
                    Some((h, m)) => format!("{h:02}:{m:02}"),
                    None => "TBA".to_string(),
                };
                let mut offer = Offer::new(
                    format!("BUS{i:03}"),
                    OfferKind::Bus,
                    "Operator",
                    class,
                    departure,
                    f64::from(price) * 300.0,
                );
                offer.rating = rating.map(|r| f64::from(r) / 10.0);
                offer.duration_minutes = duration;
                Arc::new(offer)
            })
            .collect()
    })
}
