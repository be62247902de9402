//! Test Module
//!
//! Cross-module test suite for the Optimly engine.
//!
//! ## Test Categories
//! - `pipeline_tests`: full analysis runs through the proxy client,
//!   mock fallback, aggregation, and CSV export

pub mod pipeline_tests;
