//! Validated price and rating bounds.

/// Upper end of the rating scale.
pub const MAX_RATING: f64 = 5.0;

/// Upper price bound a fresh filter starts with.
pub const DEFAULT_MAX_PRICE: f64 = 5000.0;

/// Error returned when constructing an invalid price range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidPriceRange {
    #[error("price bounds must be finite")]
    NotFinite,

    #[error("price bounds must not be negative (got {min}..={max})")]
    Negative { min: f64, max: f64 },

    #[error("minimum price {min} exceeds maximum {max}")]
    Inverted { min: f64, max: f64 },
}

/// A closed price interval `[min, max]`.
///
/// Both ends are inclusive, finite and non-negative, and `min <= max`.
///
/// ```
/// use travel_search::domain::PriceRange;
///
/// let range = PriceRange::new(0.0, 600.0).unwrap();
/// assert!(range.contains(600.0));
/// assert!(!range.contains(600.5));
///
/// assert!(PriceRange::new(600.0, 100.0).is_err());
/// assert!(PriceRange::new(-1.0, 100.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// `[0, f64::MAX]`: admits every valid price.
    pub const UNBOUNDED: PriceRange = PriceRange {
        min: 0.0,
        max: f64::MAX,
    };

    pub fn new(min: f64, max: f64) -> Result<Self, InvalidPriceRange> {
        if !min.is_finite() || !max.is_finite() {
            return Err(InvalidPriceRange::NotFinite);
        }
        if min < 0.0 || max < 0.0 {
            return Err(InvalidPriceRange::Negative { min, max });
        }
        if min > max {
            return Err(InvalidPriceRange::Inverted { min, max });
        }
        // Adding +0.0 turns -0.0 into 0.0
        Ok(Self {
            min: min + 0.0,
            max: max + 0.0,
        })
    }

    /// `[0, max]`.
    pub fn up_to(max: f64) -> Result<Self, InvalidPriceRange> {
        Self::new(0.0, max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    /// `[0, DEFAULT_MAX_PRICE]`.
    fn default() -> Self {
        Self {
            min: 0.0,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

/// Error returned when a rating threshold is outside [0, 5].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("rating threshold must be within 0..=5 (got {0})")]
pub struct InvalidRating(pub f64);

/// A rating floor in `[0, 5]`. Zero means no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MinRating(f64);

impl MinRating {
    pub const NONE: MinRating = MinRating(0.0);

    pub fn new(threshold: f64) -> Result<Self, InvalidRating> {
        if !threshold.is_finite() || !(0.0..=MAX_RATING).contains(&threshold) {
            return Err(InvalidRating(threshold));
        }
        Ok(Self(threshold + 0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0 == 0.0
    }

    pub fn admits(&self, rating: f64) -> bool {
        rating >= self.0
    }
}
