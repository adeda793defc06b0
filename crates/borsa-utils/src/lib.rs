//! Shared utilities for borsa
//!
//! This crate provides common functionality used across the borsa workspace:
//! tracing setup, environment-driven settings, and ticker symbol normalization.

pub mod config;
pub mod logging;
pub mod symbol;

pub use config::{LogFormat, Settings};
pub use logging::init_tracing_with;
pub use symbol::normalize_symbol;
