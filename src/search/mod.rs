//! Variable search across themes
//!
//! Exact queries look up one name in every theme. Partial queries match any variable
//! whose normalized name contains the term. Both return one row per theme at least.

pub mod index;

pub use index::{normalize_name, IndexEntry, SearchIndex, SearchResults, SearchRow};
