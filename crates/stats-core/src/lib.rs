//! Core types for recipe-stats.
//!
//! The delivery record model, the report shape, configuration and the shared
//! error type. Nothing in here holds running state.

pub mod error;
pub mod models;
pub mod report;
pub mod settings;

pub use error::{Result, StatsError};
