//! # External Service Boundaries
//!
//! The order pipeline talks to exactly two outside systems. Each one is reached
//! through a small `#[async_trait]` seam so the real HTTP clients in
//! [`crate::clients`] and the in-memory doubles in [`mock`] are interchangeable.
//!
//! - [`CompletionService`] - "generate a text completion for this prompt".
//! - [`SheetStore`] - "append rows to a range" and "read every row of a range".
//!
//! Handles are built once by [`OrderSystem`](crate::lifecycle::OrderSystem) and
//! shared as `Arc<dyn ...>`; nothing here is a process-wide singleton.

pub mod error;
pub mod mock;

pub use error::{CompletionError, StorageError};

use async_trait::async_trait;
use std::time::Duration;

/// Upper bound the HTTP clients put on one outbound call.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// A single sheet row as written to storage.
pub type Row = Vec<serde_json::Value>;

/// Opaque text-completion backend.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the free-form text the model produced for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Tabular storage addressed by named ranges.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Appends `rows` after the existing data of `range` in one call.
    async fn append_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), StorageError>;

    /// Reads every row of `range`, each cell rendered as text.
    async fn read_rows(&self, range: &str) -> Result<Vec<Vec<String>>, StorageError>;
}
