//! # Order Intake
//!
//! > **Chat messages in, spreadsheet rows out.**
//!
//! This crate turns free-text meat and poultry orders ("2 kg chicken and a
//! dozen eggs for Ravi, paying by UPI") into structured records appended to a
//! Google Sheet, and lists the recorded orders back.
//!
//! ## 🏗️ Request Flow
//!
//! ```text
//! POST /orders ─▶ Extractor ─▶ Order::try_from ─▶ OrderSheet::append_order ─▶ Sheets
//!                    │
//!                    └─▶ CompletionService (Gemini), retried on rate limit
//!
//! GET /orders ──▶ OrderSheet::list_orders ─▶ Sheets
//! ```
//!
//! Every request runs on its own. The only shared values are the immutable
//! service handles inside [`OrderSystem`](lifecycle::OrderSystem).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Contract ([`model`])
//! [`Order`](model::Order), [`LineItem`](model::LineItem),
//! [`PaymentMode`](model::PaymentMode) and the flattened
//! [`OrderRecord`](model::OrderRecord) read back from the sheet.
//!
//! ### 2. The Core ([`extractor`], [`order_sheet`])
//! - **Extractor**: prompt building, response cleansing, JSON parsing and the
//!   rate-limit retry loop.
//! - **OrderSheet**: one row per line item on the way in, positional mapping
//!   on the way out.
//!
//! ### 3. The Seams ([`services`], [`clients`])
//! [`CompletionService`](services::CompletionService) and
//! [`SheetStore`](services::SheetStore) are the only ways out of the process.
//! [`clients`] implements them over HTTP; [`services::mock`] implements them in
//! memory for tests.
//!
//! ### 4. The Wiring ([`lifecycle`], [`config`], [`api`])
//! [`OrderSystem`](lifecycle::OrderSystem) builds everything from a
//! [`Config`](config::Config); [`api`] exposes it over axum.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! export GEMINI_API_KEY=...
//! export SPREADSHEET_ID=...
//! export GOOGLE_APPLICATION_CREDENTIALS=/path/to/service-account.json
//! RUST_LOG=info cargo run
//!
//! curl -X POST localhost:3000/orders \
//!      -H 'content-type: application/json' \
//!      -d '{"message": "2kg chicken for Ravi, UPI"}'
//! ```

pub mod api;
pub mod clients;
pub mod config;
pub mod extractor;
pub mod lifecycle;
pub mod model;
pub mod order_sheet;
pub mod services;
