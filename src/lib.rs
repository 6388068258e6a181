//! Filter-and-aggregate core of the witness dashboard.
//!
//! The [`data`] module turns an article table and a [`data::FilterSelection`]
//! into a filtered view, summary metrics and per-label counts. [`config`]
//! holds the dashboard settings read at startup.

pub mod config;
pub mod data;
