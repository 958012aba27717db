//! Guna Milan - Ashtakoot compatibility scoring for matrimonial profiles
//!
//! This library scores two birth charts across the eight kootas of the
//! Ashtakoot system, flags Manglik dosha, and serves the result over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{resolve_chart, Scorer, ScoringError};
pub use models::{BirthChart, ChartRecord, CompatibilityReport, KootaOptions, Tier};
