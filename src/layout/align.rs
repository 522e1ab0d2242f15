/// Shape alignment.
use super::{LayoutEngine, check_shape_indices};
use crate::common::unit::truncate_emu;
use crate::common::{Error, Result, ToYaml};
use crate::shapes::{Position, Rect, ShapeSet};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How a group of shapes is aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Tops to the topmost top
    Top,
    /// Bottoms to the lowest bottom
    Bottom,
    /// Left edges to the leftmost left edge
    Left,
    /// Right edges to the rightmost right edge
    Right,
    /// Horizontal centers to their mean
    CenterHorizontal,
    /// Vertical centers to their mean
    CenterVertical,
    /// Both centers to their means
    Center,
}

static ALIGNMENT_NAMES: phf::Map<&'static str, Alignment> = phf::phf_map! {
    "top" => Alignment::Top,
    "bottom" => Alignment::Bottom,
    "left" => Alignment::Left,
    "right" => Alignment::Right,
    "center_horizontal" => Alignment::CenterHorizontal,
    "center_vertical" => Alignment::CenterVertical,
    "center" => Alignment::Center,
};

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Top => "top",
            Alignment::Bottom => "bottom",
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::CenterHorizontal => "center_horizontal",
            Alignment::CenterVertical => "center_vertical",
            Alignment::Center => "center",
        }
    }
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ALIGNMENT_NAMES.get(s).copied().ok_or_else(|| Error::InvalidParameter {
            name: "alignment type",
            value: s.to_string(),
            expected: "top, bottom, left, right, center_horizontal, center_vertical, center"
                .to_string(),
        })
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positions of the shapes before and after a move, in inches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignReport {
    pub alignment: Alignment,
    pub shape_indices: Vec<usize>,
    pub original_positions: Vec<Position>,
    pub new_positions: Vec<Position>,
}

impl ToYaml for AlignReport {}

/// Mean of `value` over `rects`, in fractional EMUs.
fn mean(rects: &[Rect], value: impl Fn(&Rect) -> f64) -> f64 {
    rects.iter().map(value).sum::<f64>() / rects.len() as f64
}

impl LayoutEngine {
    /// Align the shapes at `shape_indices`.
    ///
    /// Sizes never change. For the center alignments both means are taken
    /// from the original geometry before any shape moves, and the new
    /// origin is truncated toward zero.
    pub fn align(
        &self,
        shapes: &mut ShapeSet,
        shape_indices: &[usize],
        alignment: Alignment,
    ) -> Result<AlignReport> {
        check_shape_indices(shapes, shape_indices)?;
        if shape_indices.len() < self.options.min_align_shapes {
            return Err(Error::InsufficientShapes {
                operation: "alignment",
                required: self.options.min_align_shapes,
                got: shape_indices.len(),
            });
        }

        let rects = shape_indices
            .iter()
            .map(|&i| shapes.geometry(i))
            .collect::<Result<Vec<_>>>()?;
        let original_positions = shape_indices
            .iter()
            .zip(&rects)
            .map(|(&i, r)| Position::of(i, r))
            .collect();

        // Every slice is non-empty here, so min/max always exist.
        let min_top = rects.iter().map(Rect::top).min().unwrap_or_default();
        let max_bottom = rects.iter().map(Rect::bottom).max().unwrap_or_default();
        let min_left = rects.iter().map(Rect::left).min().unwrap_or_default();
        let max_right = rects.iter().map(Rect::right).max().unwrap_or_default();
        let center_x = mean(&rects, Rect::center_x);
        let center_y = mean(&rects, Rect::center_y);

        let aligned: Vec<Rect> = rects
            .iter()
            .map(|r| {
                let half_w = r.width() as f64 / 2.0;
                let half_h = r.height() as f64 / 2.0;
                match alignment {
                    Alignment::Top => r.with_top(min_top),
                    Alignment::Bottom => r.with_top(max_bottom - r.height()),
                    Alignment::Left => r.with_left(min_left),
                    Alignment::Right => r.with_left(max_right - r.width()),
                    Alignment::CenterHorizontal => r.with_left(truncate_emu(center_x - half_w)),
                    Alignment::CenterVertical => r.with_top(truncate_emu(center_y - half_h)),
                    Alignment::Center => r.with_origin(
                        truncate_emu(center_x - half_w),
                        truncate_emu(center_y - half_h),
                    ),
                }
            })
            .collect();

        for (&i, rect) in shape_indices.iter().zip(&aligned) {
            shapes.set_geometry(i, *rect)?;
        }
        debug!(%alignment, shapes = shape_indices.len(), "aligned shapes");

        Ok(AlignReport {
            alignment,
            shape_indices: shape_indices.to_vec(),
            original_positions,
            new_positions: shape_indices
                .iter()
                .zip(&aligned)
                .map(|(&i, r)| Position::of(i, r))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use crate::shapes::Shape;

    fn set(rects: &[(i64, i64, i64, i64)]) -> ShapeSet {
        rects
            .iter()
            .enumerate()
            .map(|(i, &(l, t, w, h))| Shape::text_box(i as u32 + 2, Rect::new(l, t, w, h).unwrap(), ""))
            .collect()
    }

    fn geometry(shapes: &ShapeSet) -> Vec<(i64, i64, i64, i64)> {
        shapes
            .geometries()
            .iter()
            .map(|r| (r.left(), r.top(), r.width(), r.height()))
            .collect()
    }

    #[test]
    fn test_parse_alignment() {
        assert_eq!("center_vertical".parse::<Alignment>().unwrap(), Alignment::CenterVertical);
        let err = "middle".parse::<Alignment>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("'middle'"));
    }

    #[test]
    fn test_edge_alignments() {
        let engine = LayoutEngine::default();
        let base = [(100, 50, 200, 100), (300, 20, 100, 300), (50, 80, 150, 50)];

        let mut shapes = set(&base);
        engine.align(&mut shapes, &[0, 1, 2], Alignment::Top).unwrap();
        assert!(geometry(&shapes).iter().all(|g| g.1 == 20));

        let mut shapes = set(&base);
        engine.align(&mut shapes, &[0, 1, 2], Alignment::Bottom).unwrap();
        assert!(shapes.geometries().iter().all(|r| r.bottom() == 320));

        let mut shapes = set(&base);
        let report = engine.align(&mut shapes, &[0, 1], Alignment::Left).unwrap();
        assert_eq!(geometry(&shapes)[1], (100, 20, 100, 300));
        assert_eq!(geometry(&shapes)[2], (50, 80, 150, 50));
        assert_eq!(report.original_positions.len(), 2);

        let mut shapes = set(&base);
        engine.align(&mut shapes, &[0, 1, 2], Alignment::Right).unwrap();
        assert!(shapes.geometries().iter().all(|r| r.right() == 400));
    }

    #[test]
    fn test_center_uses_original_means_and_truncates() {
        let engine = LayoutEngine::default();
        // centers x: 100 + 50 = 150, 0 + 1.5 = 1.5 -> mean 75.75
        let mut shapes = set(&[(100, 0, 100, 10), (0, 7, 3, 5)]);
        engine.align(&mut shapes, &[0, 1], Alignment::Center).unwrap();
        let g = geometry(&shapes);
        // 75.75 - 50 = 25.75 -> 25; 75.75 - 1.5 = 74.25 -> 74
        assert_eq!(g[0].0, 25);
        assert_eq!(g[1].0, 74);
        // centers y: 5 and 9.5 -> mean 7.25; 7.25 - 5 = 2.25 -> 2; 7.25 - 2.5 = 4.75 -> 4
        assert_eq!(g[0].1, 2);
        assert_eq!(g[1].1, 4);
        assert_eq!((g[0].2, g[0].3), (100, 10));
    }

    #[test]
    fn test_align_validation() {
        let engine = LayoutEngine::default();
        let mut shapes = set(&[(0, 0, 10, 10), (5, 5, 10, 10)]);
        let before = shapes.clone();

        let err = engine.align(&mut shapes, &[0], Alignment::Left).unwrap_err();
        assert!(matches!(err, Error::InsufficientShapes { required: 2, got: 1, .. }));

        let err = engine.align(&mut shapes, &[0, 4], Alignment::Left).unwrap_err();
        assert_eq!(err.to_string(), "Invalid shape_index: 4. Must be 0-1");

        assert!(engine.align(&mut shapes, &[1, 1], Alignment::Left).is_err());
        assert_eq!(shapes, before);
    }

    #[test]
    fn test_align_left_matches_minimum() {
        let engine = LayoutEngine::default();
        let mut shapes = set(&[(914_400, 0, 10, 10), (457_200, 0, 10, 10), (2_000_000, 0, 10, 10)]);
        let report = engine.align(&mut shapes, &[0, 1, 2], Alignment::Left).unwrap();
        assert!(report.new_positions.iter().all(|p| p.left == 0.5));
    }
}
