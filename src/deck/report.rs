//! Results of structural deck operations.
//!
//! Every report carries the deck order before and after the operation as
//! slide ids. Batch operations also carry one outcome per requested item and
//! a [`Completion`] that tells full success apart from degraded success.

use super::store::SlideId;
use crate::common::ToYaml;
use crate::shapes::ShapeKindTag;
use serde::Serialize;

/// Whether an operation did all the work it was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Completion {
    /// Every requested item was processed.
    Full,
    /// The operation succeeded but processed fewer items than requested.
    Degraded { achieved: usize, requested: usize },
}

impl Completion {
    pub fn from_counts(achieved: usize, requested: usize) -> Self {
        if achieved >= requested {
            Completion::Full
        } else {
            Completion::Degraded {
                achieved,
                requested,
            }
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        matches!(self, Completion::Full)
    }
}

/// Outcome of one item of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ItemResult {
    Done,
    Skipped { reason: String },
}

impl ItemResult {
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, ItemResult::Done)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveReport {
    pub from_index: usize,
    pub to_index: usize,
    pub slide_id: SlideId,
    pub before: Vec<SlideId>,
    pub after: Vec<SlideId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapReport {
    pub index_a: usize,
    pub index_b: usize,
    pub before: Vec<SlideId>,
    pub after: Vec<SlideId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReorderReport {
    pub new_order: Vec<usize>,
    pub before: Vec<SlideId>,
    pub after: Vec<SlideId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteReport {
    pub slide_index: usize,
    pub slide_id: SlideId,
    pub remaining_slides: usize,
    pub before: Vec<SlideId>,
    pub after: Vec<SlideId>,
}

/// Deletion outcome for one requested index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideOutcome {
    pub slide_index: usize,
    pub slide_id: Option<SlideId>,
    #[serde(flatten)]
    pub result: ItemResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteManyReport {
    pub deleted_count: usize,
    pub requested_count: usize,
    pub remaining_slides: usize,
    pub completion: Completion,
    /// Outcomes in processing order (descending index)
    pub outcomes: Vec<SlideOutcome>,
    pub before: Vec<SlideId>,
    pub after: Vec<SlideId>,
}

/// Copy outcome for one shape of a duplicated slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeOutcome {
    pub shape_index: usize,
    pub name: String,
    pub kind: ShapeKindTag,
    #[serde(flatten)]
    pub result: ItemResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateReport {
    pub source_index: usize,
    pub new_index: usize,
    pub new_slide_id: SlideId,
    pub layout: String,
    pub copied_shapes: usize,
    pub requested_shapes: usize,
    pub completion: Completion,
    pub outcomes: Vec<ShapeOutcome>,
    pub before: Vec<SlideId>,
    pub after: Vec<SlideId>,
}

impl ToYaml for MoveReport {}
impl ToYaml for SwapReport {}
impl ToYaml for ReorderReport {}
impl ToYaml for DeleteReport {}
impl ToYaml for DeleteManyReport {}
impl ToYaml for DuplicateReport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_from_counts() {
        assert_eq!(Completion::from_counts(0, 0), Completion::Full);
        assert_eq!(Completion::from_counts(3, 3), Completion::Full);
        assert_eq!(
            Completion::from_counts(2, 3),
            Completion::Degraded {
                achieved: 2,
                requested: 3
            }
        );
        assert!(!Completion::from_counts(1, 2).is_full());
    }

    #[test]
    fn test_report_yaml() {
        let report = MoveReport {
            from_index: 4,
            to_index: 1,
            slide_id: SlideId(260),
            before: vec![SlideId(256), SlideId(257)],
            after: vec![SlideId(257), SlideId(256)],
        };
        let yaml = report.to_yaml().unwrap();
        assert!(yaml.contains("from_index: 4"));
        assert!(yaml.contains("slide_id: 260"));
    }
}
