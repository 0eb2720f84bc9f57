//! Common types shared across the guest initializer.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Transaction Attributes:** Metadata carried on guest memory writes.
//! 2. **Error Handling:** The construction-time error taxonomy.

/// Memory transaction attribute definitions.
pub mod attrs;

/// Error types surfaced during device construction.
pub mod error;

pub use attrs::MemTxAttrs;
pub use error::RealizeError;
