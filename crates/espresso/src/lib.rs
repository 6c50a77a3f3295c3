//! Espresso: a terminal reader for daily RSS and arXiv digests.
//!
//! The digests are static JSON published by an offline pipeline: an index of
//! days plus one document per day. This crate fetches them from a site URL or a
//! local copy of the site and renders the index timeline and day pages.

pub mod commands;
pub mod config;
pub mod dates;
pub mod display;
pub mod error;
pub mod model;
pub mod share;
pub mod source;
pub mod theme;
pub mod view;

pub use config::Config;
pub use error::{EspressoError, FetchError, Result};
pub use model::{Categories, DailySummary, DayIndexEntry, FeedItem, Highlight};
pub use source::{create_source, DigestSource};
pub use view::{DayState, DayView, IndexState, IndexView, LoadTicket};
