//! Data ingestion layer for recipe-stats.
//!
//! Streams the delivery JSON array record by record, folds each record into
//! running statistics and compiles the final report.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use stats_core as core;
