//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`, falling back to `info` when the variable is unset.
//!
//! ```bash
//! # Milestones only: extraction attempts, appends, listings
//! RUST_LOG=info cargo run
//!
//! # Full prompts, completion text and rows
//! RUST_LOG=debug cargo run
//!
//! # Only this crate at debug
//! RUST_LOG=order_intake=debug,tower_http=info cargo run
//! ```
//!
//! A typical placed order at `info` level reads:
//!
//! ```text
//! INFO request{method=POST uri=/orders}:place_order:extract: Order extracted attempt=1
//! INFO request{method=POST uri=/orders}:place_order:append_order: Order appended rows=2 customer=Ravi
//! INFO request{method=POST uri=/orders}:place_order: Order recorded rows=2 customer=Ravi
//! ```
//!
//! Rate limits show up as `WARN ... Rate limited, retrying attempt=1 delay=5s`.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
