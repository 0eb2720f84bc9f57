//! # Unit Tests
//!
//! Fine-grained tests for the guest initializer's components:
//! configuration, mode classification, image loading, the reset broadcast,
//! and the device's end-to-end reset behavior.

/// Configuration deserialization and defaults.
pub mod config;
