//! Common types, traits, and utilities shared across modules.
//!
//! This module provides the unified error type and the unit conversion layer
//! used by both the deck editor and the layout engine, plus YAML helpers
//! for reports and configuration.

// Submodule declarations
pub mod error;
pub mod unit;
pub mod yaml;

// Re-exports for convenience
pub use error::{Error, ErrorKind, IndexRange, Result};
pub use unit::{EMUS_PER_INCH, SlideDimensions, UnitConversion, emu_to_inches, inches_to_emu};
pub use yaml::ToYaml;
