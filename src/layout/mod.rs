//! Geometry and layout engine for the shapes on a slide.
//!
//! All operations work on the integer EMU geometry of a [`ShapeSet`] and
//! report positions in inches. Mutating operations (alignment and
//! distribution) validate every input before touching any shape, so a failed
//! call leaves the shapes unchanged.
//!
//! # Example
//!
//! ```rust
//! use deckwright::layout::{Alignment, LayoutEngine};
//! use deckwright::shapes::{Rect, Shape, ShapeSet};
//!
//! let mut shapes = ShapeSet::new();
//! shapes.push(Shape::text_box(2, Rect::from_inches(1.0, 1.0, 2.0, 1.0).unwrap(), "A"));
//! shapes.push(Shape::text_box(3, Rect::from_inches(1.05, 3.0, 2.0, 1.0).unwrap(), "B"));
//!
//! let engine = LayoutEngine::default();
//! let suggestions = engine.suggest_alignment(&shapes);
//! assert!(suggestions.suggestion_count > 0);
//!
//! engine.align(&mut shapes, &[0, 1], Alignment::Left).unwrap();
//! assert_eq!(shapes.geometry(1).unwrap().left(), 914400);
//! ```

mod align;
mod config;
mod distribute;
mod metrics;
mod overlap;
mod suggest;

pub use align::{AlignReport, Alignment};
pub use config::{LayoutOptions, MIN_ALIGN_SHAPES, MIN_DISTRIBUTE_SHAPES};
pub use distribute::{Direction, DistributeReport};
pub use metrics::{
    AlignmentSpread, ContentBounds, CoverageAnalysis, LayoutMetrics, ShapeMetrics, SpacingAnalysis,
};
pub use overlap::{OverlapPair, OverlapReport, ReferenceOverlap, ReferenceOverlapReport};
pub use suggest::{Suggestion, SuggestionKind, SuggestionReport};

use crate::common::{Error, Result};
use crate::shapes::ShapeSet;
use fixedbitset::FixedBitSet;

/// Layout engine holding the tunable options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutEngine {
    pub(crate) options: LayoutOptions,
}

impl LayoutEngine {
    #[inline]
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }
}

/// Every index must address a shape, and no index may repeat.
pub(crate) fn check_shape_indices(shapes: &ShapeSet, indices: &[usize]) -> Result<()> {
    for &index in indices {
        Error::check_index("shape_index", index, shapes.len())?;
    }

    let mut seen = FixedBitSet::with_capacity(shapes.len());
    let mut repeated: Vec<usize> = indices.iter().copied().filter(|&i| seen.put(i)).collect();
    if repeated.is_empty() {
        return Ok(());
    }
    repeated.sort_unstable();
    repeated.dedup();
    Err(Error::DuplicateIndices { indices: repeated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rect, Shape};

    #[test]
    fn test_check_shape_indices() {
        let shapes: ShapeSet = (0..3)
            .map(|i| Shape::text_box(i + 2, Rect::new(0, 0, 10, 10).unwrap(), ""))
            .collect();
        assert!(check_shape_indices(&shapes, &[2, 0, 1]).is_ok());
        assert!(check_shape_indices(&shapes, &[]).is_ok());

        let err = check_shape_indices(&shapes, &[0, 3]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid shape_index: 3. Must be 0-2");

        let err = check_shape_indices(&shapes, &[1, 0, 1, 1]).unwrap_err();
        assert!(matches!(err, Error::DuplicateIndices { indices } if indices == vec![1]));
    }
}
