/// Even distribution of shapes along one axis.
use super::{LayoutEngine, check_shape_indices};
use crate::common::unit::{EMUS_PER_INCH, truncate_emu};
use crate::common::{Error, Result, ToYaml};
use crate::shapes::{Position, Rect, ShapeSet};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Axis along which shapes are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }

    /// Leading edge along this axis.
    #[inline]
    fn lead(&self, rect: &Rect) -> i64 {
        match self {
            Direction::Horizontal => rect.left(),
            Direction::Vertical => rect.top(),
        }
    }

    /// Extent along this axis.
    #[inline]
    fn extent(&self, rect: &Rect) -> i64 {
        match self {
            Direction::Horizontal => rect.width(),
            Direction::Vertical => rect.height(),
        }
    }

    #[inline]
    fn place(&self, rect: &Rect, lead: i64) -> Rect {
        match self {
            Direction::Horizontal => rect.with_left(lead),
            Direction::Vertical => rect.with_top(lead),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "horizontal" => Ok(Direction::Horizontal),
            "vertical" => Ok(Direction::Vertical),
            _ => Err(Error::InvalidParameter {
                name: "direction",
                value: s.to_string(),
                expected: "horizontal, vertical".to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributeReport {
    pub direction: Direction,
    pub shape_indices: Vec<usize>,
    /// Gap between neighbours, in inches; negative when the shapes
    /// cannot fit the span without overlapping
    pub gap: f64,
    pub original_positions: Vec<Position>,
    pub new_positions: Vec<Position>,
}

impl ToYaml for DistributeReport {}

impl LayoutEngine {
    /// Spread shapes so the gaps between neighbours are equal.
    ///
    /// The first and last shape along the axis stay in place; the others
    /// are placed between them in order of their leading edge. Each origin
    /// is truncated toward zero.
    pub fn distribute(
        &self,
        shapes: &mut ShapeSet,
        shape_indices: &[usize],
        direction: Direction,
    ) -> Result<DistributeReport> {
        check_shape_indices(shapes, shape_indices)?;
        let count = shape_indices.len();
        if count < self.options.min_distribute_shapes {
            return Err(Error::InsufficientShapes {
                operation: "distribution",
                required: self.options.min_distribute_shapes,
                got: count,
            });
        }

        let mut placed = shape_indices
            .iter()
            .map(|&i| shapes.geometry(i).map(|r| (i, r)))
            .collect::<Result<Vec<_>>>()?;
        let original_positions = placed.iter().map(|(i, r)| Position::of(*i, r)).collect();

        // Stable sort: shapes sharing a leading edge keep their request order.
        let mut sorted = placed.clone();
        sorted.sort_by_key(|(_, r)| direction.lead(r));

        let first = direction.lead(&sorted[0].1);
        let (_, last) = sorted[count - 1];
        let span = direction.lead(&last) + direction.extent(&last) - first;
        let occupied: i64 = sorted.iter().map(|(_, r)| direction.extent(r)).sum();
        let gap = (span - occupied) as f64 / (count - 1) as f64;

        let mut cursor = first as f64;
        for (index, rect) in &sorted {
            let moved = direction.place(rect, truncate_emu(cursor));
            shapes.set_geometry(*index, moved)?;
            if let Some(entry) = placed.iter_mut().find(|(i, _)| i == index) {
                entry.1 = moved;
            }
            cursor += direction.extent(rect) as f64 + gap;
        }
        debug!(%direction, shapes = count, gap, "distributed shapes");

        Ok(DistributeReport {
            direction,
            shape_indices: shape_indices.to_vec(),
            gap: gap / EMUS_PER_INCH as f64,
            original_positions,
            new_positions: placed.iter().map(|(i, r)| Position::of(*i, r)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;
    use proptest::prelude::*;

    fn row(lefts_widths: &[(i64, i64)]) -> ShapeSet {
        lefts_widths
            .iter()
            .enumerate()
            .map(|(i, &(l, w))| Shape::text_box(i as u32 + 2, Rect::new(l, 0, w, 100).unwrap(), ""))
            .collect()
    }

    fn gaps(shapes: &ShapeSet, direction: Direction) -> Vec<i64> {
        let mut rects = shapes.geometries();
        rects.sort_by_key(|r| direction.lead(r));
        rects
            .windows(2)
            .map(|w| direction.lead(&w[1]) - (direction.lead(&w[0]) + direction.extent(&w[0])))
            .collect()
    }

    #[test]
    fn test_distribute_horizontal() {
        let engine = LayoutEngine::default();
        // Request order differs from visual order.
        let mut shapes = row(&[(1000, 100), (0, 100), (150, 200)]);
        let report = engine
            .distribute(&mut shapes, &[0, 1, 2], Direction::Horizontal)
            .unwrap();
        // span 1100, occupied 400 -> gap 350
        assert_eq!(gaps(&shapes, Direction::Horizontal), vec![350, 350]);
        assert_eq!(shapes.geometry(2).unwrap().left(), 450);
        assert_eq!(report.new_positions[0].index, 0);
        assert_eq!(report.gap, 350.0 / 914_400.0);
    }

    #[test]
    fn test_distribute_vertical_allows_negative_gap() {
        let engine = LayoutEngine::default();
        let mut shapes: ShapeSet = [(0, 400), (100, 400), (300, 400)]
            .iter()
            .enumerate()
            .map(|(i, &(t, h))| Shape::text_box(i as u32 + 2, Rect::new(0, t, 50, h).unwrap(), ""))
            .collect();
        let report = engine.distribute(&mut shapes, &[0, 1, 2], Direction::Vertical).unwrap();
        // span 700, occupied 1200 -> gap -250
        assert!(report.gap < 0.0);
        assert_eq!(shapes.geometry(1).unwrap().top(), 150);
        assert_eq!(shapes.geometry(2).unwrap().top(), 300);
    }

    #[test]
    fn test_distribute_requires_three_shapes() {
        let engine = LayoutEngine::default();
        let mut shapes = row(&[(0, 10), (50, 10), (100, 10)]);
        let err = engine.distribute(&mut shapes, &[0, 2], Direction::Horizontal).unwrap_err();
        assert_eq!(
            err.to_string(),
            "At least 3 shapes are required for distribution, got 2"
        );
        assert!("diagonal".parse::<Direction>().is_err());
    }

    proptest! {
        #[test]
        fn prop_three_shapes_get_equal_gaps(
            widths in prop::array::uniform3(1i64..2_000_000),
            spacing in prop::array::uniform2(0i64..3_000_000),
        ) {
            let l0 = 0;
            let l1 = l0 + widths[0] + spacing[0];
            let l2 = l1 + widths[1] + spacing[1];
            let mut shapes = row(&[(l0, widths[0]), (l1, widths[1]), (l2, widths[2])]);
            LayoutEngine::default()
                .distribute(&mut shapes, &[0, 1, 2], Direction::Horizontal)
                .unwrap();
            let g = gaps(&shapes, Direction::Horizontal);
            // Truncation can move the middle shape by less than one EMU.
            prop_assert!((g[0] - g[1]).abs() <= 1);
            prop_assert_eq!(shapes.geometry(2).unwrap().left(), l2);
        }
    }
}
