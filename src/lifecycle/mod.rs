//! # System Lifecycle & Orchestration
//!
//! This module wires the order pipeline together and sets up observability.
//!
//! **Key Responsibilities:**
//! 1. **Client Construction** - build the Gemini and Sheets clients from [`Config`](crate::config::Config)
//! 2. **Dependency Injection** - hand each component the service handle it needs
//! 3. **Request Flow** - run extraction, validation and the append for one message
//! 4. **Observability Setup** - initialize tracing and logging
//!
//! ## Dependency Injection
//!
//! Nothing in the crate reaches for a global client. [`OrderSystem::new`] takes
//! `Arc<dyn CompletionService>` and `Arc<dyn SheetStore>` handles, which is how
//! tests substitute [`MockCompletion`](crate::services::mock::MockCompletion)
//! and [`MockSheet`](crate::services::mock::MockSheet):
//!
//! ```rust
//! use order_intake::extractor::RetryPolicy;
//! use order_intake::lifecycle::OrderSystem;
//! use order_intake::services::mock::{MockCompletion, MockSheet};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut completion = MockCompletion::new();
//!     completion.expect_generate().return_ok(
//!         r#"{"customer_name": "Ravi", "items": [{"item": "Chicken", "quantity": 2, "unit": "kg", "price": 240}]}"#,
//!     );
//!     let mut sheet = MockSheet::new();
//!     sheet.expect_append().return_ok();
//!
//!     let system = OrderSystem::new(
//!         completion.service(),
//!         sheet.store(),
//!         "Sheet1!A:I",
//!         RetryPolicy::default(),
//!     );
//!     let order = system.place_order("2kg chicken for Ravi").await.unwrap();
//!     assert_eq!(order.items[0].total_price, 480.0);
//! }
//! ```
//!
//! ## Observability
//!
//! See the [`tracing`] module for log levels and sample output.

pub mod error;
pub mod order_system;
pub mod tracing;

pub use error::*;
pub use order_system::*;
pub use self::tracing::setup_tracing;
