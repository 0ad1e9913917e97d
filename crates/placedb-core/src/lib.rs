// crates/placedb-core/src/lib.rs

//! # placedb-core
//!
//! Resolves place references — ZIP codes, geonames identifiers, legacy
//! free-text city names, and partial autocomplete queries — into
//! normalized [`Location`] records (coordinates, timezone, display name,
//! population, administrative hierarchy).
//!
//! Two components cooperate:
//!
//! - the ingestion pipeline ([`builder`], behind the `builder` feature)
//!   turns raw tab-delimited geonames.org extracts and a ZIP code dump
//!   into two lookup-optimized SQLite stores with FTS5 search indexes;
//! - the resolution engine ([`GeoDb`]) answers exact-match, legacy-name
//!   and autocomplete queries against those stores, memoizing results.

pub mod autocomplete;
#[cfg(feature = "builder")]
pub mod builder;
pub mod error;
pub mod geodb;
pub mod location;
pub mod text;

// Re-exports
pub use crate::autocomplete::{AutocompleteResult, AUTOCOMPLETE_LIMIT};
pub use crate::error::{GeoError, Result};
pub use crate::geodb::GeoDb;
pub use crate::location::{usa_tzid, GeoId, Location, Provenance};
pub use crate::text::normalize_key;
