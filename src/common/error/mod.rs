//! Unified error types for deckwright.
//!
//! This module provides a single error type covering validation, lookup
//! and configuration failures, presenting a consistent API to users.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, ErrorKind, IndexRange, Result};
