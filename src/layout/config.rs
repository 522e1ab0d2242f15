/// Configuration of the layout engine.
///
/// The options can be built in code or loaded from YAML:
///
/// ```yaml
/// alignment_tolerance_inches: 0.05
/// distribution_spread_factor: 2.0
/// ```
///
/// Fields missing from the YAML keep their defaults.
use crate::common::unit::inches_to_emu;
use crate::common::yaml::from_yaml_str;
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest shape count that alignment accepts.
pub const MIN_ALIGN_SHAPES: usize = 2;
/// Smallest shape count that distribution accepts.
pub const MIN_DISTRIBUTE_SHAPES: usize = 3;

/// Options for the layout engine.
///
/// # Examples
///
/// ```rust
/// use deckwright::layout::LayoutOptions;
///
/// let options = LayoutOptions::new().with_alignment_tolerance(0.05);
/// assert_eq!(options.alignment_tolerance_inches, 0.05);
/// assert_eq!(options.min_distribute_shapes, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Distance within which two edges or centers count as nearly aligned
    pub alignment_tolerance_inches: f64,
    /// A row or column qualifies for a distribution suggestion when its
    /// cross-axis spread is at most this many tolerances
    pub distribution_spread_factor: f64,
    /// Minimum number of shapes for alignment
    pub min_align_shapes: usize,
    /// Minimum number of shapes for distribution
    pub min_distribute_shapes: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            alignment_tolerance_inches: 0.1,
            distribution_spread_factor: 2.0,
            min_align_shapes: MIN_ALIGN_SHAPES,
            min_distribute_shapes: MIN_DISTRIBUTE_SHAPES,
        }
    }
}

impl LayoutOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the near-alignment tolerance, in inches.
    #[inline]
    pub fn with_alignment_tolerance(mut self, inches: f64) -> Self {
        self.alignment_tolerance_inches = inches;
        self
    }

    #[inline]
    pub fn with_distribution_spread_factor(mut self, factor: f64) -> Self {
        self.distribution_spread_factor = factor;
        self
    }

    /// Set the alignment minimum. Values below 2 are raised to 2.
    #[inline]
    pub fn with_min_align_shapes(mut self, count: usize) -> Self {
        self.min_align_shapes = count.max(MIN_ALIGN_SHAPES);
        self
    }

    /// Set the distribution minimum. Values below 3 are raised to 3.
    #[inline]
    pub fn with_min_distribute_shapes(mut self, count: usize) -> Self {
        self.min_distribute_shapes = count.max(MIN_DISTRIBUTE_SHAPES);
        self
    }

    /// Parse options from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let options: LayoutOptions = from_yaml_str(text)?;
        options.validated()
    }

    /// Load options from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Reject unusable values and raise minimums to their floor.
    fn validated(mut self) -> Result<Self> {
        if !self.alignment_tolerance_inches.is_finite() || self.alignment_tolerance_inches < 0.0 {
            return Err(Error::Config(format!(
                "alignment_tolerance_inches must be a non-negative number, got {}",
                self.alignment_tolerance_inches
            )));
        }
        if !self.distribution_spread_factor.is_finite() || self.distribution_spread_factor < 0.0 {
            return Err(Error::Config(format!(
                "distribution_spread_factor must be a non-negative number, got {}",
                self.distribution_spread_factor
            )));
        }
        self.min_align_shapes = self.min_align_shapes.max(MIN_ALIGN_SHAPES);
        self.min_distribute_shapes = self.min_distribute_shapes.max(MIN_DISTRIBUTE_SHAPES);
        Ok(self)
    }

    /// Tolerance in EMUs.
    #[inline]
    pub(crate) fn tolerance_emu(&self) -> i64 {
        inches_to_emu(self.alignment_tolerance_inches)
    }

    /// Largest cross-axis spread, in EMUs, that still suggests distribution.
    #[inline]
    pub(crate) fn distribution_spread_emu(&self) -> i64 {
        inches_to_emu(self.alignment_tolerance_inches * self.distribution_spread_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = LayoutOptions::default();
        assert_eq!(options.tolerance_emu(), 91_440);
        assert_eq!(options.distribution_spread_emu(), 182_880);
        assert_eq!(options.min_align_shapes, 2);
    }

    #[test]
    fn test_minimums_are_clamped() {
        let options = LayoutOptions::new()
            .with_min_align_shapes(0)
            .with_min_distribute_shapes(5);
        assert_eq!(options.min_align_shapes, 2);
        assert_eq!(options.min_distribute_shapes, 5);
    }

    #[test]
    fn test_from_yaml_str() {
        let options =
            LayoutOptions::from_yaml_str("alignment_tolerance_inches: 0.25\nmin_distribute_shapes: 1\n")
                .unwrap();
        assert_eq!(options.alignment_tolerance_inches, 0.25);
        assert_eq!(options.distribution_spread_factor, 2.0);
        assert_eq!(options.min_distribute_shapes, 3);

        let err = LayoutOptions::from_yaml_str("alignment_tolerance_inches: -1.0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(LayoutOptions::from_yaml_str("alignment_tolerance_inches: [1, 2]\n").is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "distribution_spread_factor: 3.0").unwrap();
        let options = LayoutOptions::from_yaml_file(file.path()).unwrap();
        assert_eq!(options.distribution_spread_factor, 3.0);

        let missing = LayoutOptions::from_yaml_file("/nonexistent/deckwright.yaml").unwrap_err();
        assert!(matches!(missing, Error::Io(_)));
    }
}
