/// Alignment suggestions.
///
/// A read-only heuristic that looks for shapes whose edges or centers are
/// almost, but not exactly, lined up. Distances are compared in EMUs and
/// the tolerance is inclusive.
use super::LayoutEngine;
use crate::common::ToYaml;
use crate::shapes::{Rect, ShapeSet};
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashSet;
use tracing::trace;

const NOT_ENOUGH_SHAPES: &str = "Not enough shapes to suggest alignment improvements";

/// Smallest near-aligned group worth reporting. Independent of the
/// minimum the align operation enforces.
const MIN_CLUSTER_SHAPES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    LeftAlignment,
    RightAlignment,
    CenterHorizontalAlignment,
    TopAlignment,
    HorizontalDistribution,
    VerticalDistribution,
}

impl SuggestionKind {
    fn verb(&self) -> &'static str {
        match self {
            SuggestionKind::LeftAlignment => "left-aligned",
            SuggestionKind::RightAlignment => "right-aligned",
            SuggestionKind::CenterHorizontalAlignment => "center-aligned horizontally",
            SuggestionKind::TopAlignment => "top-aligned",
            SuggestionKind::HorizontalDistribution => "distributed evenly horizontally",
            SuggestionKind::VerticalDistribution => "distributed evenly vertically",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    /// Seed shape first, then its neighbours in index order; distribution
    /// suggestions list shapes in visual order along the axis
    pub shape_indices: Vec<usize>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionReport {
    pub total_shapes: usize,
    pub tolerance_inches: f64,
    pub suggestions: Vec<Suggestion>,
    pub suggestion_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ToYaml for SuggestionReport {}

type Cluster = SmallVec<[usize; 8]>;

/// Features checked for near-alignment, in report order.
const ALIGNMENT_FEATURES: [SuggestionKind; 4] = [
    SuggestionKind::LeftAlignment,
    SuggestionKind::RightAlignment,
    SuggestionKind::CenterHorizontalAlignment,
    SuggestionKind::TopAlignment,
];

fn feature(kind: SuggestionKind, rect: &Rect) -> f64 {
    match kind {
        SuggestionKind::LeftAlignment => rect.left() as f64,
        SuggestionKind::RightAlignment => rect.right() as f64,
        SuggestionKind::CenterHorizontalAlignment => rect.center_x(),
        _ => rect.top() as f64,
    }
}

impl LayoutEngine {
    /// Suggest alignments and distributions for the shapes on a slide.
    pub fn suggest_alignment(&self, shapes: &ShapeSet) -> SuggestionReport {
        let rects = shapes.geometries();
        let tolerance_inches = self.options.alignment_tolerance_inches;

        if rects.len() < MIN_CLUSTER_SHAPES {
            return SuggestionReport {
                total_shapes: rects.len(),
                tolerance_inches,
                suggestions: Vec::new(),
                suggestion_count: 0,
                message: Some(NOT_ENOUGH_SHAPES.to_string()),
            };
        }

        let tolerance = self.options.tolerance_emu() as f64;
        let mut seen: HashSet<(SuggestionKind, Cluster)> = HashSet::new();
        let mut suggestions = Vec::new();
        let mut offer = |kind: SuggestionKind, cluster: Cluster, description: String| {
            let mut key = cluster.clone();
            key.sort_unstable();
            if seen.insert((kind, key)) {
                suggestions.push(Suggestion {
                    kind,
                    shape_indices: cluster.into_vec(),
                    description,
                });
            }
        };

        for kind in ALIGNMENT_FEATURES {
            let values: Vec<f64> = rects.iter().map(|r| feature(kind, r)).collect();
            for (i, &seed) in values.iter().enumerate() {
                let mut cluster: Cluster = SmallVec::new();
                cluster.push(i);
                cluster.extend(
                    values
                        .iter()
                        .enumerate()
                        .filter(|&(j, &v)| j != i && (seed - v).abs() <= tolerance)
                        .map(|(j, _)| j),
                );
                if cluster.len() >= MIN_CLUSTER_SHAPES {
                    let description = format!(
                        "Shapes {:?} could be {} (currently within {} inches)",
                        cluster.as_slice(),
                        kind.verb(),
                        tolerance_inches
                    );
                    offer(kind, cluster, description);
                }
            }
        }

        if rects.len() >= self.options.min_distribute_shapes {
            let spread_limit = self.options.distribution_spread_emu();
            // (suggestion, cross axis that must be tight, axis to order by)
            let candidates: [(SuggestionKind, fn(&Rect) -> i64, fn(&Rect) -> i64); 2] = [
                (SuggestionKind::HorizontalDistribution, Rect::top, Rect::left),
                (SuggestionKind::VerticalDistribution, Rect::left, Rect::top),
            ];
            for (kind, cross_axis, along_axis) in candidates {
                if spread(&rects, cross_axis) > spread_limit {
                    continue;
                }
                let mut order: Cluster = (0..rects.len()).collect();
                order.sort_by_key(|&i| along_axis(&rects[i]));
                offer(kind, order, format!("Shapes could be {}", kind.verb()));
            }
        }

        trace!(shapes = rects.len(), suggestions = suggestions.len(), "alignment suggestions");
        SuggestionReport {
            total_shapes: rects.len(),
            tolerance_inches,
            suggestion_count: suggestions.len(),
            suggestions,
            message: None,
        }
    }
}

/// `max - min` of a coordinate over a non-empty slice.
fn spread(rects: &[Rect], coordinate: fn(&Rect) -> i64) -> i64 {
    let min = rects.iter().map(coordinate).min().unwrap_or_default();
    let max = rects.iter().map(coordinate).max().unwrap_or_default();
    max - min
}
