//! Departures scraped from the legacy DepartureVision page.
//!
//! The page is an HTML table with one row per departure. Its layout drifts:
//! columns are located by header name, and a row that is missing its track
//! cell is repaired before the fields are read. Prefer [`crate::feed`]
//! wherever the XML feeds are available; this source only carries clock
//! times and display-oriented text.

mod client;
mod columns;
mod error;
mod extract;

pub use client::{DEFAULT_BASE_URL, DepartureVisionClient};
pub use columns::map_departures;
pub use error::{DepartureVisionError, TableFormatError};
pub use extract::{Table, extract_table};
