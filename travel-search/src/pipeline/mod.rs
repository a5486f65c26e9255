//! Client-side filter-and-sort pipeline over fetched offers.
//!
//! Everything here is a pure function of its inputs: the fetched result set
//! is never mutated, only reduced and reordered into derived views.

mod config;
mod filter;
mod sort;
mod spec;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use config::FilterConfig;
pub use filter::{filter, matches};
pub use sort::{InvalidSortKey, SortKey, compare, sort};
pub use spec::FilterSpec;
pub use view::derive_view;
