//! Spear Common Library
//!
//! Shared code for the Spear ranking crates including:
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use crate::config::{AppConfig, CreditScheme, RankingSettings};
pub use crate::errors::{Result, SpearError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of mutual reinforcement rounds
pub const DEFAULT_ITERATIONS: usize = 250;
