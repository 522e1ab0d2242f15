/// Overlap detection.
///
/// Rectangles overlap only when their interiors intersect; shapes that share
/// an edge do not overlap. All tests run on the integer EMU geometry, so the
/// strictness is exact.
use super::LayoutEngine;
use crate::common::{Error, Result, ToYaml};
use crate::shapes::{Bounds, ShapeSet};
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapPair {
    pub shape1_index: usize,
    pub shape1_name: String,
    pub shape2_index: usize,
    pub shape2_name: String,
    /// Intersection area in square inches
    pub overlap_area: f64,
    pub overlap_bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapReport {
    pub total_shapes: usize,
    pub overlapping_pairs: usize,
    pub overlaps: Vec<OverlapPair>,
    pub has_overlaps: bool,
}

/// A shape overlapping a reference shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceOverlap {
    pub index: usize,
    pub name: String,
    pub bounds: Bounds,
    pub overlap_area: f64,
    /// Intersection area as a percentage of the reference shape's area
    pub overlap_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceOverlapReport {
    pub reference_shape_index: usize,
    pub reference_shape: Bounds,
    pub overlapping_shapes: Vec<ReferenceOverlap>,
    pub count: usize,
}

impl ToYaml for OverlapReport {}
impl ToYaml for ReferenceOverlapReport {}

impl LayoutEngine {
    /// Every pair of overlapping shapes on a slide, in index order.
    pub fn detect_overlaps(&self, shapes: &ShapeSet) -> OverlapReport {
        let rects = shapes.geometries();
        let mut overlaps = Vec::new();

        for (i, a) in rects.iter().enumerate() {
            for (j, b) in rects.iter().enumerate().skip(i + 1) {
                let Some(common) = a.intersection(b) else {
                    continue;
                };
                overlaps.push(OverlapPair {
                    shape1_index: i,
                    shape1_name: shape_name(shapes, i),
                    shape2_index: j,
                    shape2_name: shape_name(shapes, j),
                    overlap_area: common.area_inches(),
                    overlap_bounds: common.to_bounds(),
                });
            }
        }
        trace!(shapes = rects.len(), overlaps = overlaps.len(), "overlap scan");

        OverlapReport {
            total_shapes: rects.len(),
            overlapping_pairs: overlaps.len(),
            has_overlaps: !overlaps.is_empty(),
            overlaps,
        }
    }

    /// Shapes overlapping the shape at `reference`.
    pub fn overlapping_with(&self, shapes: &ShapeSet, reference: usize) -> Result<ReferenceOverlapReport> {
        let reference_rect = shapes.geometry(reference).map_err(|e| match e {
            Error::IndexOutOfRange { value, range, .. } => Error::IndexOutOfRange {
                name: "reference_shape_index",
                value,
                range,
            },
            other => other,
        })?;
        let reference_area = reference_rect.area_inches();

        let overlapping_shapes: Vec<ReferenceOverlap> = shapes
            .geometries()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != reference)
            .filter_map(|(i, rect)| {
                reference_rect.intersection(rect).map(|common| {
                    let overlap_area = common.area_inches();
                    ReferenceOverlap {
                        index: i,
                        name: shape_name(shapes, i),
                        bounds: rect.to_bounds(),
                        overlap_area,
                        overlap_percentage: overlap_area / reference_area * 100.0,
                    }
                })
            })
            .collect();

        Ok(ReferenceOverlapReport {
            reference_shape_index: reference,
            reference_shape: reference_rect.to_bounds(),
            count: overlapping_shapes.len(),
            overlapping_shapes,
        })
    }
}

fn shape_name(shapes: &ShapeSet, index: usize) -> String {
    shapes
        .get(index)
        .map(|s| s.name().to_string())
        .unwrap_or_else(|| format!("Shape {}", index))
}
