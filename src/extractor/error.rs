//! Error types for the Extractor.

use thiserror::Error;

/// Errors that can occur while turning a message into an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractError {
    /// A single attempt was rate limited. The extractor retries these and
    /// reports [`ExtractError::Exhausted`] once attempts run out.
    #[error("Completion service rate limited: {0}")]
    RateLimited(String),

    /// Every attempt allowed by the retry policy was rate limited.
    #[error("Order extraction gave up after {attempts} rate-limited attempts")]
    Exhausted { attempts: u32 },

    /// The completion service failed, or its output was not order JSON.
    #[error("Order extraction failed: {0}")]
    Failed(String),
}
