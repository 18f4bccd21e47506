//! # Mock Services & Testing Guide
//!
//! [`MockCompletion`] and [`MockSheet`] implement the service traits entirely
//! in memory. Each one holds a queue of expectations that are consumed in
//! order, so a test states exactly which calls it expects and what each call
//! returns, then checks with `verify()` that nothing was left unused.
//!
//! | Feature | Mock | Real client |
//! |---------|------|-------------|
//! | **Speed** | Instant (in-memory) | Network round-trip |
//! | **Determinism** | Scripted responses | Subject to quotas and latency |
//! | **Error Injection** | Easy (`return_err`) | Hard (needs a real 429) |
//!
//! ## Example
//!
//! ```rust
//! use order_intake::services::mock::MockCompletion;
//! use order_intake::services::{CompletionError, CompletionService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockCompletion::new();
//!     mock.expect_generate()
//!         .return_err(CompletionError::RateLimited("slow down".into()));
//!     mock.expect_generate().return_ok(r#"{"items": []}"#);
//!
//!     let service = mock.service();
//!     assert!(service.generate("prompt").await.is_err());
//!     assert!(service.generate("prompt").await.is_ok());
//!
//!     mock.verify();
//!     assert_eq!(mock.calls(), 2);
//! }
//! ```
//!
//! A call with no queued expectation panics, which fails the test at the
//! point the unexpected request was made.

use crate::services::{CompletionError, CompletionService, Row, SheetStore, StorageError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// COMPLETION SERVICE
// =============================================================================

/// Scripted [`CompletionService`].
#[derive(Clone, Default)]
pub struct MockCompletion {
    expectations: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shareable handle backed by this mock.
    pub fn service(&self) -> Arc<dyn CompletionService> {
        Arc::new(self.clone())
    }

    /// Expects one more `generate` call.
    pub fn expect_generate(&mut self) -> GenerateExpectationBuilder {
        GenerateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of `generate` calls received.
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.expectations.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None => panic!("Unexpected generate call: no expectation queued"),
        }
    }
}

/// Builder for `generate` expectations.
pub struct GenerateExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
}

impl GenerateExpectationBuilder {
    /// Sets the expectation to return this completion text.
    pub fn return_ok(self, text: impl Into<String>) {
        self.expectations.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: CompletionError) {
        self.expectations.lock().unwrap().push_back(Err(error));
    }
}

// =============================================================================
// SHEET STORE
// =============================================================================

enum SheetExpectation {
    Append {
        response: Result<(), StorageError>,
    },
    Read {
        response: Result<Vec<Vec<String>>, StorageError>,
    },
}

/// A recorded `append_rows` call.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendCall {
    pub range: String,
    pub rows: Vec<Row>,
}

/// Scripted [`SheetStore`].
#[derive(Clone, Default)]
pub struct MockSheet {
    expectations: Arc<Mutex<VecDeque<SheetExpectation>>>,
    appends: Arc<Mutex<Vec<AppendCall>>>,
    reads: Arc<Mutex<Vec<String>>>,
}

impl MockSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shareable handle backed by this mock.
    pub fn store(&self) -> Arc<dyn SheetStore> {
        Arc::new(self.clone())
    }

    /// Expects an `append_rows` call.
    pub fn expect_append(&mut self) -> AppendExpectationBuilder {
        AppendExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `read_rows` call.
    pub fn expect_read(&mut self) -> ReadExpectationBuilder {
        ReadExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Append calls received so far.
    pub fn appends(&self) -> Vec<AppendCall> {
        self.appends.lock().unwrap().clone()
    }

    /// Ranges passed to `read_rows` so far.
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl SheetStore for MockSheet {
    async fn append_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), StorageError> {
        self.appends.lock().unwrap().push(AppendCall {
            range: range.to_string(),
            rows,
        });
        let next = self.expectations.lock().unwrap().pop_front();
        match next {
            Some(SheetExpectation::Append { response }) => response,
            _ => panic!("Unexpected append_rows call or expectation mismatch"),
        }
    }

    async fn read_rows(&self, range: &str) -> Result<Vec<Vec<String>>, StorageError> {
        self.reads.lock().unwrap().push(range.to_string());
        let next = self.expectations.lock().unwrap().pop_front();
        match next {
            Some(SheetExpectation::Read { response }) => response,
            _ => panic!("Unexpected read_rows call or expectation mismatch"),
        }
    }
}

/// Builder for `append_rows` expectations.
pub struct AppendExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<SheetExpectation>>>,
}

impl AppendExpectationBuilder {
    pub fn return_ok(self) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(SheetExpectation::Append { response: Ok(()) });
    }

    pub fn return_err(self, error: StorageError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(SheetExpectation::Append {
                response: Err(error),
            });
    }
}

/// Builder for `read_rows` expectations.
pub struct ReadExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<SheetExpectation>>>,
}

impl ReadExpectationBuilder {
    /// Sets the rows returned by the read, header row included.
    pub fn return_ok(self, rows: Vec<Vec<&str>>) {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        self.expectations
            .lock()
            .unwrap()
            .push_back(SheetExpectation::Read { response: Ok(rows) });
    }

    pub fn return_err(self, error: StorageError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(SheetExpectation::Read {
                response: Err(error),
            });
    }
}
