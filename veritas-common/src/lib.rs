//! # Veritas Common Library
//!
//! Shared code for the Veritas trust-scoring engine including:
//! - Domain models (content items, signals, analysis results)
//! - Event types (EngineEvent enum) and EventBus
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod events;
pub mod models;

pub use error::{Error, Result};
