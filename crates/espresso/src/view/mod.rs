//! View state for the two pages of the reader.
//!
//! Views own the document they fetched and nothing else; they communicate only
//! through the date they are pointed at.

pub mod day;
pub mod index;

pub use day::{DayState, DayView, LoadTicket, OutlineEntry, SectionAnchor};
pub use index::{IndexState, IndexView, TimelineRow};

/// Page title shown while no particular day is open
pub const SITE_TITLE: &str = "Espresso Daily Digest";
