//! # ccsim Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Ship list, host configuration, and setup fixtures
//! - A stand-in for recorded battles
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;

/// Install a tracing subscriber writing to the test output.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
