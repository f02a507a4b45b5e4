//! NJ Transit train data normalization.
//!
//! Turns the agency's XML feeds and the legacy DepartureVision page into
//! typed, deduplicated trains, stations and stops. Decoding is pure and
//! synchronous; the HTTP clients are thin shims over it.

pub mod cache;
pub mod departurevision;
pub mod domain;
pub mod feed;
pub mod stations;
