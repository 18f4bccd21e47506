//! Error types for the order pipeline.

use crate::extractor::ExtractError;
use crate::services::{CompletionError, StorageError};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while placing or listing orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The request carried no message text.
    #[error("Message is required")]
    MissingInput,

    /// The message could not be turned into order JSON.
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    /// The extracted order has no usable line items.
    #[error("Malformed order: {0}")]
    MalformedOrder(String),

    /// The spreadsheet append or read failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The request ran past [`OrderSystem::request_timeout`](super::OrderSystem::request_timeout).
    #[error("Order request timed out after {0:?}")]
    TimedOut(Duration),
}

/// Errors raised while building the real service clients.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SetupError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
