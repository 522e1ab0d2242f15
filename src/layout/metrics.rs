/// Layout metrics.
///
/// Aggregates the geometry of a slide into spacing, alignment spread and
/// coverage figures. Every value is reported in inches (areas in square
/// inches, coverage and density in percent).
use super::LayoutEngine;
use crate::common::unit::{emu_to_inches, square_emu_to_square_inches};
use crate::common::{EMUS_PER_INCH, SlideDimensions, ToYaml};
use crate::shapes::{Rect, ShapeSet};
use serde::Serialize;
use tracing::trace;

/// Geometry of a single shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeMetrics {
    pub index: usize,
    pub name: String,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub area: f64,
}

impl ShapeMetrics {
    fn new(index: usize, name: &str, rect: &Rect) -> Self {
        Self {
            index,
            name: name.to_string(),
            left: emu_to_inches(rect.left()),
            top: emu_to_inches(rect.top()),
            right: emu_to_inches(rect.right()),
            bottom: emu_to_inches(rect.bottom()),
            width: emu_to_inches(rect.width()),
            height: emu_to_inches(rect.height()),
            center_x: rect.center_x() / EMUS_PER_INCH as f64,
            center_y: rect.center_y() / EMUS_PER_INCH as f64,
            area: rect.area_inches(),
        }
    }
}

/// Gaps between shapes that face each other.
///
/// A horizontal gap is measured between two shapes whose vertical extents
/// overlap, a vertical gap between two shapes whose horizontal extents
/// overlap. Statistics are 0 when there are no gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpacingAnalysis {
    pub horizontal_gaps: Vec<f64>,
    pub vertical_gaps: Vec<f64>,
    pub avg_horizontal_gap: f64,
    pub avg_vertical_gap: f64,
    pub min_horizontal_gap: f64,
    pub max_horizontal_gap: f64,
    pub min_vertical_gap: f64,
    pub max_vertical_gap: f64,
}

/// `max - min` of each feature across all shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AlignmentSpread {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageAnalysis {
    /// Union bounding box of every shape; `None` for an empty slide
    pub content_bounds: Option<ContentBounds>,
    pub coverage_x_percent: f64,
    pub coverage_y_percent: f64,
    /// Sum of shape areas over slide area; overlapping shapes count twice
    pub density_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutMetrics {
    pub slide_dimensions: SlideDimensions,
    pub total_shapes: usize,
    pub shape_metrics: Vec<ShapeMetrics>,
    pub spacing_analysis: SpacingAnalysis,
    pub alignment_spread: AlignmentSpread,
    pub coverage_analysis: CoverageAnalysis,
}

impl ToYaml for LayoutMetrics {}

impl LayoutEngine {
    /// Compute layout metrics for the shapes on a slide of the given size.
    pub fn layout_metrics(&self, shapes: &ShapeSet, slide: SlideDimensions) -> LayoutMetrics {
        let rects = shapes.geometries();
        let shape_metrics: Vec<ShapeMetrics> = shapes
            .iter()
            .zip(&rects)
            .enumerate()
            .map(|(i, (shape, rect))| ShapeMetrics::new(i, shape.name(), rect))
            .collect();

        let metrics = LayoutMetrics {
            slide_dimensions: slide,
            total_shapes: rects.len(),
            spacing_analysis: spacing(&rects),
            alignment_spread: alignment_spread(&shape_metrics),
            coverage_analysis: coverage(&rects, &slide),
            shape_metrics,
        };
        trace!(
            shapes = metrics.total_shapes,
            density = metrics.coverage_analysis.density_percent,
            "layout metrics"
        );
        metrics
    }
}

fn spacing(rects: &[Rect]) -> SpacingAnalysis {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();

    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            if a.faces_horizontally(b) {
                if a.right() <= b.left() {
                    horizontal.push(emu_to_inches(b.left() - a.right()));
                } else if b.right() <= a.left() {
                    horizontal.push(emu_to_inches(a.left() - b.right()));
                }
            }
            if a.faces_vertically(b) {
                if a.bottom() <= b.top() {
                    vertical.push(emu_to_inches(b.top() - a.bottom()));
                } else if b.bottom() <= a.top() {
                    vertical.push(emu_to_inches(a.top() - b.bottom()));
                }
            }
        }
    }

    let (avg_h, min_h, max_h) = stats(&horizontal);
    let (avg_v, min_v, max_v) = stats(&vertical);
    SpacingAnalysis {
        horizontal_gaps: horizontal,
        vertical_gaps: vertical,
        avg_horizontal_gap: avg_h,
        avg_vertical_gap: avg_v,
        min_horizontal_gap: min_h,
        max_horizontal_gap: max_h,
        min_vertical_gap: min_v,
        max_vertical_gap: max_v,
    }
}

/// (mean, min, max), all 0 for an empty list.
fn stats(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (sum / values.len() as f64, min, max)
}

fn alignment_spread(metrics: &[ShapeMetrics]) -> AlignmentSpread {
    if metrics.is_empty() {
        return AlignmentSpread::default();
    }
    let range = |value: fn(&ShapeMetrics) -> f64| {
        let min = metrics.iter().map(value).fold(f64::INFINITY, f64::min);
        let max = metrics.iter().map(value).fold(f64::NEG_INFINITY, f64::max);
        max - min
    };
    AlignmentSpread {
        left: range(|m| m.left),
        right: range(|m| m.right),
        top: range(|m| m.top),
        bottom: range(|m| m.bottom),
        center_x: range(|m| m.center_x),
        center_y: range(|m| m.center_y),
    }
}

fn coverage(rects: &[Rect], slide: &SlideDimensions) -> CoverageAnalysis {
    let Some(content) = rects.iter().copied().reduce(|acc, r| acc.union(&r)) else {
        return CoverageAnalysis::default();
    };

    let percent = |part: i64, whole: i64| {
        if whole == 0 {
            0.0
        } else {
            part as f64 / whole as f64 * 100.0
        }
    };
    let slide_area = slide.width_emu as i128 * slide.height_emu as i128;
    let ink: i128 = rects.iter().map(Rect::area).sum();
    let density_percent = if slide_area == 0 {
        0.0
    } else {
        square_emu_to_square_inches(ink) / square_emu_to_square_inches(slide_area) * 100.0
    };

    CoverageAnalysis {
        content_bounds: Some(ContentBounds {
            left: emu_to_inches(content.left()),
            top: emu_to_inches(content.top()),
            right: emu_to_inches(content.right()),
            bottom: emu_to_inches(content.bottom()),
            width: emu_to_inches(content.width()),
            height: emu_to_inches(content.height()),
        }),
        coverage_x_percent: percent(content.width(), slide.width_emu),
        coverage_y_percent: percent(content.height(), slide.height_emu),
        density_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;

    fn shapes(rects: &[(f64, f64, f64, f64)]) -> ShapeSet {
        rects
            .iter()
            .enumerate()
            .map(|(i, &(l, t, w, h))| {
                Shape::text_box(i as u32 + 2, Rect::from_inches(l, t, w, h).unwrap(), "")
            })
            .collect()
    }

    fn slide() -> SlideDimensions {
        // 10 x 7.5 inches
        SlideDimensions::from_emu(9_144_000, 6_858_000)
    }

    #[test]
    fn test_empty_slide() {
        let metrics = LayoutEngine::default().layout_metrics(&ShapeSet::new(), slide());
        assert_eq!(metrics.total_shapes, 0);
        assert!(metrics.coverage_analysis.content_bounds.is_none());
        assert_eq!(metrics.coverage_analysis.density_percent, 0.0);
        assert_eq!(metrics.spacing_analysis, SpacingAnalysis::default());
        assert_eq!(metrics.alignment_spread, AlignmentSpread::default());
    }

    #[test]
    fn test_gaps_only_between_facing_shapes() {
        // 0 and 1 side by side, 2 below 0, 3 diagonal to everything.
        let metrics = LayoutEngine::default().layout_metrics(
            &shapes(&[
                (0.0, 0.0, 1.0, 1.0),
                (2.0, 0.5, 1.0, 1.0),
                (0.5, 3.0, 1.0, 1.0),
                (6.0, 6.0, 1.0, 1.0),
            ]),
            slide(),
        );
        let spacing = &metrics.spacing_analysis;
        assert_eq!(spacing.horizontal_gaps, vec![1.0]);
        assert_eq!(spacing.vertical_gaps, vec![2.0]);
        assert_eq!(spacing.avg_horizontal_gap, 1.0);
        assert_eq!(spacing.max_vertical_gap, 2.0);
    }

    #[test]
    fn test_touching_shapes_have_zero_gap() {
        let metrics = LayoutEngine::default()
            .layout_metrics(&shapes(&[(0.0, 0.0, 1.0, 1.0), (1.0, 0.0, 1.0, 1.0)]), slide());
        assert_eq!(metrics.spacing_analysis.horizontal_gaps, vec![0.0]);
        assert!(metrics.spacing_analysis.vertical_gaps.is_empty());
    }

    #[test]
    fn test_coverage_and_density() {
        // Two overlapping 2x2 squares: union 3x3, ink 8 square inches.
        let metrics = LayoutEngine::default()
            .layout_metrics(&shapes(&[(1.0, 1.0, 2.0, 2.0), (2.0, 2.0, 2.0, 2.0)]), slide());
        let coverage = &metrics.coverage_analysis;
        let bounds = coverage.content_bounds.unwrap();
        assert_eq!((bounds.left, bounds.right, bounds.width), (1.0, 4.0, 3.0));
        assert!((coverage.coverage_x_percent - 30.0).abs() < 1e-9);
        assert!((coverage.coverage_y_percent - 40.0).abs() < 1e-9);
        assert!((coverage.density_percent - 8.0 / 75.0 * 100.0).abs() < 1e-9);

        assert_eq!(metrics.alignment_spread.left, 1.0);
        assert_eq!(metrics.shape_metrics[1].center_x, 3.0);
        assert_eq!(metrics.shape_metrics[0].area, 4.0);
        assert!((metrics.slide_dimensions.aspect_ratio - 4.0 / 3.0).abs() < 1e-12);
    }
}
