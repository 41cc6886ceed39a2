//! Configuration module for lead collection runs
//!
//! This module provides the `PipelineConfig` struct and its type-safe builder
//! with validation and defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{PipelineConfigBuilder, WithQueries};
pub use types::PipelineConfig;
