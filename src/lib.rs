//! hyperleda - Fetch HyperLeda galaxy pages and extract their properties table
//!
//! This crate provides:
//! - A cache policy deciding whether a page is read remotely or from a local file
//! - Swappable page fetchers (plain HTTP, or anything implementing `Fetcher`)
//! - HTML table extraction into rectangular tables, in document order
//! - The properties table (the sixth table of the page) keyed by parameter name

pub mod cache;
pub mod config;
pub mod fetch;
pub mod record;
pub mod table;
#[cfg(test)]
pub mod testutil;

pub use record::{GalaxyRecord, RecordError, RecordOptions, ResolvedPath};
