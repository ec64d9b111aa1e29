//! Swipe engine error types

use thiserror::Error;

/// Errors surfaced by the swipe engine
///
/// Gesture handling itself never fails; errors only come from values a host
/// hands the engine that it cannot use.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwipeError {
    /// A configuration value is out of range
    #[error("Invalid swipe configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for swipe operations
pub type Result<T> = std::result::Result<T, SwipeError>;
