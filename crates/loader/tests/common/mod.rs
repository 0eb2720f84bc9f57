//! Shared test infrastructure for the guest initializer suite.

pub mod harness;
pub mod mocks;
