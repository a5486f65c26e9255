//! The search session: one result set plus the user's filter and sort choices.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::backend::{BackendError, SearchCriteria};
use crate::domain::{DepartureSlot, MinRating, Offer, OfferClass, PriceRange};
use crate::pipeline::{FilterConfig, FilterSpec, SortKey, derive_view};

use super::category::FilterCategory;
use super::error::SessionError;
use super::provider::OfferProvider;

/// A filtered, ordered view of the current results.
pub type View = Arc<[Arc<Offer>]>;

/// Handle for a search that has been started but not yet completed.
///
/// Only the most recently issued ticket can apply its response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "pass the ticket to `complete_search` once the response arrives"]
pub struct SearchTicket {
    generation: u64,
    criteria: SearchCriteria,
}

impl SearchTicket {
    /// The criteria this search was started with.
    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }
}

/// What happened to a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response replaced the result set.
    Applied {
        /// Offers in the new result set
        fetched: usize,
        /// Offers in the recomputed view
        visible: usize,
    },
    /// A newer search was started (or the session reset) before this one
    /// finished; the response was discarded.
    Stale,
}

/// Holds the fetched offers and the active filter/sort selection.
///
/// Every successful mutation recomputes the view and publishes it to
/// subscribers. Failed mutations leave everything untouched.
///
/// Searches are split into [`begin_search`](Self::begin_search) and
/// [`complete_search`](Self::complete_search) so that overlapping requests
/// resolve last-request-wins: a response for anything but the latest ticket
/// is dropped.
#[derive(Debug)]
pub struct SearchSession {
    config: FilterConfig,
    spec: FilterSpec,
    sort_key: SortKey,
    criteria: Option<SearchCriteria>,
    results: Arc<[Arc<Offer>]>,
    generation: u64,
    view: watch::Sender<View>,
}

impl SearchSession {
    /// Create an empty session with filters at `config`'s defaults.
    pub fn new(config: FilterConfig) -> Self {
        let (view, _) = watch::channel(View::from(Vec::new()));
        Self {
            spec: config.default_spec(),
            sort_key: config.default_sort,
            config,
            criteria: None,
            results: Arc::from(Vec::new()),
            generation: 0,
            view,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Criteria of the search whose results are currently held.
    pub fn criteria(&self) -> Option<&SearchCriteria> {
        self.criteria.as_ref()
    }

    /// The full, unfiltered result set in backend order.
    pub fn results(&self) -> &[Arc<Offer>] {
        &self.results
    }

    /// The current filtered and sorted view.
    pub fn view(&self) -> View {
        self.view.borrow().clone()
    }

    /// Receive every recomputed view.
    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.view.subscribe()
    }

    /// Number of filter categories narrowing the results.
    pub fn active_filter_count(&self) -> usize {
        self.spec.active_count(&self.config.default_spec())
    }

    /// Toggle a value in a category named by string.
    ///
    /// `category` is `busType`/`class` or `departureTime`/`slot`. Returns
    /// whether the value is selected afterwards.
    pub fn toggle(&mut self, category: &str, value: &str) -> Result<bool, SessionError> {
        match category.parse::<FilterCategory>()? {
            FilterCategory::Class => {
                let name = value.trim();
                if name.is_empty() {
                    return Err(SessionError::InvalidArgument(
                        "class name must not be empty".to_string(),
                    ));
                }
                Ok(self.toggle_class(OfferClass::new(name)))
            }
            FilterCategory::Slot => {
                let slot: DepartureSlot = value.parse()?;
                Ok(self.toggle_slot(slot))
            }
        }
    }

    /// Add the class to the filter if absent, remove it if present.
    pub fn toggle_class(&mut self, class: OfferClass) -> bool {
        let selected = self.spec.toggle_class(class);
        self.refresh();
        selected
    }

    /// Add the slot to the filter if absent, remove it if present.
    pub fn toggle_slot(&mut self, slot: DepartureSlot) -> bool {
        let selected = self.spec.toggle_slot(slot);
        self.refresh();
        selected
    }

    /// Restrict prices to `[min, max]`, inclusive.
    pub fn set_price_range(&mut self, min: f64, max: f64) -> Result<(), SessionError> {
        self.spec.price_range = PriceRange::new(min, max)?;
        self.refresh();
        Ok(())
    }

    /// Hide offers whose effective rating is below `threshold`.
    pub fn set_minimum_rating(&mut self, threshold: f64) -> Result<(), SessionError> {
        self.spec.min_rating = MinRating::new(threshold)?;
        self.refresh();
        Ok(())
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.refresh();
    }

    /// Set the sort key from its wire name.
    pub fn set_sort_key_str(&mut self, key: &str) -> Result<SortKey, SessionError> {
        let key: SortKey = key.parse()?;
        self.set_sort_key(key);
        Ok(key)
    }

    /// Put every filter back to its default. The sort key is kept.
    pub fn clear(&mut self) {
        self.spec = self.config.default_spec();
        self.refresh();
    }

    /// Drop the result set and invalidate any search in flight.
    ///
    /// Filters and sort key are kept.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.criteria = None;
        self.results = Arc::from(Vec::new());
        debug!(generation = self.generation, "session reset");
        self.refresh();
    }

    /// Start a search, superseding any search already in flight.
    pub fn begin_search(&mut self, criteria: SearchCriteria) -> SearchTicket {
        self.generation += 1;
        debug!(generation = self.generation, kind = %criteria.kind(), "search started");
        SearchTicket {
            generation: self.generation,
            criteria,
        }
    }

    /// Apply the response for `ticket`.
    ///
    /// A stale ticket's response is discarded whether it succeeded or not.
    /// On failure of the current search the previous results stay in place.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<Offer>, BackendError>,
    ) -> Result<SearchOutcome, SessionError> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale search response"
            );
            return Ok(SearchOutcome::Stale);
        }

        let offers = result?;
        let fetched = offers.len();

        self.results = offers.into_iter().map(Arc::new).collect();
        self.criteria = Some(ticket.criteria);
        let visible = self.refresh();

        debug!(fetched, visible, "search applied");
        Ok(SearchOutcome::Applied { fetched, visible })
    }

    /// Run a search against `provider` and apply its response.
    pub async fn search<P: OfferProvider>(
        &mut self,
        provider: &P,
        criteria: SearchCriteria,
    ) -> Result<SearchOutcome, SessionError> {
        let ticket = self.begin_search(criteria);
        let result = provider.search(ticket.criteria()).await;
        self.complete_search(ticket, result)
    }

    fn refresh(&mut self) -> usize {
        let view = View::from(derive_view(&self.results, &self.spec, self.sort_key));
        let visible = view.len();
        trace!(visible, total = self.results.len(), sort = %self.sort_key, "view recomputed");
        self.view.send_replace(view);
        visible
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}
