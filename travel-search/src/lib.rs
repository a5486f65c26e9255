//! Travel search server.
//!
//! Searches a booking backend for buses, flights and hotels, then narrows
//! and orders the results by class, departure time, price and rating.

pub mod backend;
pub mod domain;
pub mod pipeline;
pub mod session;
pub mod web;
