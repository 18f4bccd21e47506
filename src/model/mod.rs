//! Pure data structures for orders, line items and recorded sheet rows.

pub mod order;
pub mod payment;
pub mod record;

pub use order::*;
pub use payment::*;
pub use record::*;
