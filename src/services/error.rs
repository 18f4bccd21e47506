//! # Service Errors
//!
//! Errors surfaced by the two external backends. Adapters classify their
//! failures into these enums so the extractor and the order sheet never see
//! transport-specific types.

/// Errors returned by a [`CompletionService`](crate::services::CompletionService).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum CompletionError {
    /// The service refused the request because of quota or throughput limits.
    #[error("Completion service rate limited: {0}")]
    RateLimited(String),
    #[error("Completion service error: {0}")]
    Failed(String),
}

/// Errors returned by a [`SheetStore`](crate::services::SheetStore).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StorageError {
    #[error("Storage authentication failed: {0}")]
    Auth(String),
    #[error("Storage request failed: {0}")]
    Request(String),
    #[error("Unexpected storage response: {0}")]
    InvalidResponse(String),
}
