//! Shape positioning and lookup.
//!
//! Callers speak inches; the collection stores EMUs. Every write goes
//! through [`try_inches_to_emu`], so fractional EMUs are truncated and
//! values that cannot be a coordinate are rejected.

use super::collection::ShapeSet;
use super::geometry::{Bounds, Rect};
use super::shape::{ShapeKind, ShapeKindTag};
use crate::common::unit::{emu_to_inches, try_inches_to_emu};
use crate::common::{Error, Result};
use regex::RegexBuilder;
use serde::Serialize;
use tracing::debug;

/// Maximum number of characters in a text preview.
const TEXT_PREVIEW_CHARS: usize = 100;

/// Description of one shape, in both unit systems.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeInfo {
    pub index: usize,
    pub shape_id: u32,
    pub name: String,
    pub kind: ShapeKindTag,
    pub placeholder: Option<String>,
    pub left_emu: i64,
    pub top_emu: i64,
    pub width_emu: i64,
    pub height_emu: i64,
    pub bounds: Bounds,
    /// First 100 characters of the text, with `...` when cut
    pub text_preview: Option<String>,
}

/// Original and new bounds of a repositioned or resized shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeUpdate {
    pub index: usize,
    pub name: String,
    pub original: Bounds,
    pub new: Bounds,
}

fn text_preview(text: &str) -> String {
    match text.char_indices().nth(TEXT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn check_positive(width: f64, height: f64) -> Result<()> {
    // Negated so NaN fails too
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(Error::InvalidGeometry(format!(
            "width and height must be positive and finite, got {}x{} in",
            width, height
        )));
    }
    Ok(())
}

impl ShapeSet {
    /// Describe the shape at `index`.
    pub fn shape_info(&self, index: usize) -> Result<ShapeInfo> {
        let shape = self.shape(index)?;
        let rect = shape.geometry();
        Ok(ShapeInfo {
            index,
            shape_id: shape.shape_id(),
            name: shape.name().to_string(),
            kind: shape.kind().tag(),
            placeholder: shape.placeholder().map(str::to_string),
            left_emu: rect.left(),
            top_emu: rect.top(),
            width_emu: rect.width(),
            height_emu: rect.height(),
            bounds: rect.to_bounds(),
            text_preview: shape.text().map(|t| text_preview(&t)),
        })
    }

    fn apply(&mut self, index: usize, rect: Rect) -> Result<ShapeUpdate> {
        let original = self.geometry(index)?;
        self.set_geometry(index, rect)?;
        let name = self.shape(index)?.name().to_string();
        debug!(index, name = %name, ?original, new = ?rect, "shape geometry updated");
        Ok(ShapeUpdate {
            index,
            name,
            original: original.to_bounds(),
            new: rect.to_bounds(),
        })
    }

    /// Move and resize a shape. `bounds` is in inches; the origin must not be
    /// negative and the size must be positive.
    pub fn update_shape_position(&mut self, index: usize, bounds: Bounds) -> Result<ShapeUpdate> {
        Error::check_index("shape_index", index, self.len())?;
        if !(bounds.left >= 0.0 && bounds.top >= 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "position must be non-negative, got ({}, {}) in",
                bounds.left, bounds.top
            )));
        }
        check_positive(bounds.width, bounds.height)?;
        let rect = Rect::from_inches(bounds.left, bounds.top, bounds.width, bounds.height)?;
        self.apply(index, rect)
    }

    /// Resize a shape in place, keeping its origin.
    pub fn update_shape_size(&mut self, index: usize, width: f64, height: f64) -> Result<ShapeUpdate> {
        let current = self.geometry(index)?;
        check_positive(width, height)?;
        let rect = current.with_size(
            try_inches_to_emu("width", width)?,
            try_inches_to_emu("height", height)?,
        )?;
        self.apply(index, rect)
    }

    /// Move a shape by a delta in inches. The result is clamped at the slide origin.
    ///
    /// The new origin is computed in inches and truncated once, so a
    /// fractional delta lands where the same move expressed as an absolute
    /// position would.
    pub fn nudge_shape(&mut self, index: usize, delta_x: f64, delta_y: f64) -> Result<ShapeUpdate> {
        let current = self.geometry(index)?;
        if !(delta_x.is_finite() && delta_y.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "move delta must be finite, got ({}, {}) in",
                delta_x, delta_y
            )));
        }
        let left = (emu_to_inches(current.left()) + delta_x).max(0.0);
        let top = (emu_to_inches(current.top()) + delta_y).max(0.0);
        let rect = Rect::new(
            try_inches_to_emu("left", left)?,
            try_inches_to_emu("top", top)?,
            current.width(),
            current.height(),
        )?;
        self.apply(index, rect)
    }

    /// Resize a picture.
    ///
    /// With `maintain_aspect_ratio` the requested box is shrunk to the
    /// picture's ratio: the limiting dimension is kept and the other derived.
    pub fn resize_picture(
        &mut self,
        index: usize,
        width: f64,
        height: f64,
        maintain_aspect_ratio: bool,
    ) -> Result<ShapeUpdate> {
        let shape = self.shape(index)?;
        if !matches!(shape.kind(), ShapeKind::Picture(_)) {
            return Err(Error::InvalidParameter {
                name: "shape",
                value: shape.kind().tag().to_string(),
                expected: "picture".to_string(),
            });
        }
        check_positive(width, height)?;

        let current = shape.geometry();
        let (mut width, mut height) = (width, height);
        if maintain_aspect_ratio {
            let original_ratio = current.width() as f64 / current.height() as f64;
            if width / height > original_ratio {
                width = height * original_ratio;
            } else {
                height = width / original_ratio;
            }
        }
        let rect = current.with_size(
            try_inches_to_emu("width", width)?,
            try_inches_to_emu("height", height)?,
        )?;
        self.apply(index, rect)
    }

    /// All shapes of one kind.
    pub fn shapes_by_kind(&self, kind: ShapeKindTag) -> Vec<ShapeInfo> {
        self.collect_info(|i| self.shapes_kind(i) == Some(kind))
    }

    /// All shapes whose name matches `pattern`, case-insensitively.
    pub fn shapes_by_name_pattern(&self, pattern: &str) -> Result<Vec<ShapeInfo>> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(self.collect_info(|i| self.get(i).is_some_and(|s| regex.is_match(s.name()))))
    }

    /// Text boxes that are not placeholders.
    pub fn text_boxes(&self) -> Vec<ShapeInfo> {
        self.collect_info(|i| {
            self.get(i)
                .is_some_and(|s| matches!(s.kind(), ShapeKind::Text(_)) && !s.is_placeholder())
        })
    }

    fn shapes_kind(&self, index: usize) -> Option<ShapeKindTag> {
        self.get(index).map(|s| s.kind().tag())
    }

    fn collect_info(&self, keep: impl Fn(usize) -> bool) -> Vec<ShapeInfo> {
        (0..self.len())
            .filter(|&i| keep(i))
            .filter_map(|i| self.shape_info(i).ok())
            .collect()
    }
}
