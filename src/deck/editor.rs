/// Structural edits of a deck: move, swap, reorder, delete and duplicate.
///
/// Everything here is built from the [`SlideStore`] primitives. Each
/// operation validates all of its arguments before touching the deck, so a
/// validation error always leaves the deck unchanged.
use super::duplicate::{ShapeIds, copy_shape};
use super::report::{
    Completion, DeleteManyReport, DeleteReport, DuplicateReport, ItemResult, MoveReport,
    ReorderReport, ShapeOutcome, SlideOutcome, SwapReport,
};
use super::store::{SlideId, SlideRef, SlideStore};
use crate::common::{Error, IndexRange, Result};
use crate::shapes::Shape;
use fixedbitset::FixedBitSet;
use tracing::{debug, warn};

/// Editor over one document's deck.
///
/// # Examples
///
/// ```rust
/// use deckwright::deck::{Document, SequenceEditor, SlideStore};
///
/// let mut doc = Document::new();
/// for _ in 0..5 {
///     doc.add_slide("Blank");
/// }
/// let before = doc.order();
///
/// let report = SequenceEditor::new(&mut doc).move_slide(4, 1)?;
/// assert_eq!(report.after, vec![before[0], before[4], before[1], before[2], before[3]]);
/// # Ok::<(), deckwright::Error>(())
/// ```
pub struct SequenceEditor<'a, S: SlideStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: SlideStore + ?Sized> SequenceEditor<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &*self.store
    }

    /// Remove the reference at `from` and reinsert it at `to`.
    ///
    /// If the insert fails the reference is put back where it was.
    fn relocate(&mut self, from: usize, to: usize) -> Result<()> {
        let slide = self.store.remove_slide_ref(from)?;
        if let Err(e) = self.store.insert_slide_ref(to, slide.clone()) {
            self.store.insert_slide_ref(from, slide)?;
            return Err(e);
        }
        Ok(())
    }

    /// Replace the whole deck with `refs`.
    fn rebuild(&mut self, refs: &[SlideRef]) -> Result<()> {
        while let Some(last) = self.store.slide_count().checked_sub(1) {
            self.store.remove_slide_ref(last)?;
        }
        for (i, slide) in refs.iter().enumerate() {
            self.store.insert_slide_ref(i, slide.clone())?;
        }
        Ok(())
    }

    /// Move the slide at `from_index` to `to_index`.
    ///
    /// Both indices must be existing positions. Moving a slide onto its own
    /// position is a no-op.
    pub fn move_slide(&mut self, from_index: usize, to_index: usize) -> Result<MoveReport> {
        let len = self.store.slide_count();
        Error::check_index("from_index", from_index, len)?;
        Error::check_index("to_index", to_index, len)?;

        let before = self.store.order();
        let slide_id = before[from_index];
        if from_index != to_index {
            self.relocate(from_index, to_index)?;
            debug!(from_index, to_index, %slide_id, "moved slide");
        }

        Ok(MoveReport {
            from_index,
            to_index,
            slide_id,
            before,
            after: self.store.order(),
        })
    }

    /// Exchange the slides at `index_a` and `index_b`.
    ///
    /// Composed from two moves: the slide further back is moved forward
    /// first, then the displaced slide (now one position later) is moved
    /// back into the vacated position.
    pub fn swap_slides(&mut self, index_a: usize, index_b: usize) -> Result<SwapReport> {
        let len = self.store.slide_count();
        Error::check_index("index_a", index_a, len)?;
        Error::check_index("index_b", index_b, len)?;

        let before = self.store.order();
        if index_a != index_b {
            let (first, second) = if index_a > index_b {
                ((index_a, index_b), (index_b + 1, index_a))
            } else {
                ((index_b, index_a), (index_a + 1, index_b))
            };
            self.relocate(first.0, first.1)?;
            if let Err(e) = self.relocate(second.0, second.1) {
                self.relocate(first.1, first.0)?;
                return Err(e);
            }
            debug!(index_a, index_b, "swapped slides");
        }

        Ok(SwapReport {
            index_a,
            index_b,
            before,
            after: self.store.order(),
        })
    }

    /// Rearrange the deck so that slide `i` becomes the old slide `new_order[i]`.
    ///
    /// `new_order` must be a permutation of `0..slide_count`.
    pub fn reorder_slides(&mut self, new_order: &[usize]) -> Result<ReorderReport> {
        let len = self.store.slide_count();
        if new_order.len() != len {
            return Err(Error::PermutationLength {
                expected: len,
                got: new_order.len(),
            });
        }
        let mut seen = FixedBitSet::with_capacity(len);
        for &index in new_order {
            if index >= len || seen.contains(index) {
                return Err(Error::NotAPermutation {
                    range: IndexRange::slots(len),
                    found: index,
                });
            }
            seen.insert(index);
        }

        let original = self.store.slide_refs().to_vec();
        let before = self.store.order();
        let reordered: Vec<SlideRef> = new_order.iter().map(|&i| original[i].clone()).collect();
        if let Err(e) = self.rebuild(&reordered) {
            self.rebuild(&original)?;
            return Err(e);
        }
        debug!(slides = len, "reordered slides");

        Ok(ReorderReport {
            new_order: new_order.to_vec(),
            before,
            after: self.store.order(),
        })
    }

    /// Remove one slide and release its content.
    fn remove_and_release(&mut self, index: usize) -> Result<SlideId> {
        let slide = self.store.remove_slide_ref(index)?;
        if let Err(e) = self.store.release_slide(&slide) {
            self.store.insert_slide_ref(index, slide)?;
            return Err(e);
        }
        Ok(slide.id())
    }

    /// Delete the slide at `slide_index`.
    pub fn delete_slide(&mut self, slide_index: usize) -> Result<DeleteReport> {
        Error::check_index("slide_index", slide_index, self.store.slide_count())?;

        let before = self.store.order();
        let slide_id = self.remove_and_release(slide_index)?;
        debug!(slide_index, %slide_id, "deleted slide");

        Ok(DeleteReport {
            slide_index,
            slide_id,
            remaining_slides: self.store.slide_count(),
            before,
            after: self.store.order(),
        })
    }

    /// Delete several slides.
    ///
    /// Every index is validated and duplicates are rejected before anything
    /// is deleted. Slides are then removed from the highest index down so
    /// earlier removals never shift later ones. A slide that fails to delete
    /// is recorded as skipped and the batch carries on.
    pub fn delete_slides(&mut self, slide_indices: &[usize]) -> Result<DeleteManyReport> {
        let len = self.store.slide_count();
        for &index in slide_indices {
            Error::check_index("slide_index", index, len)?;
        }

        let mut seen = FixedBitSet::with_capacity(len);
        let mut duplicates = Vec::new();
        for &index in slide_indices {
            if seen.put(index) {
                duplicates.push(index);
            }
        }
        if !duplicates.is_empty() {
            duplicates.sort_unstable();
            duplicates.dedup();
            return Err(Error::DuplicateIndices {
                indices: duplicates,
            });
        }

        let before = self.store.order();
        let mut sorted = slide_indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut outcomes = Vec::with_capacity(sorted.len());
        for slide_index in sorted {
            let slide_id = before.get(slide_index).copied();
            let result = match self.remove_and_release(slide_index) {
                Ok(_) => ItemResult::Done,
                Err(e) => {
                    warn!(slide_index, error = %e, "failed to delete slide, continuing");
                    ItemResult::Skipped {
                        reason: e.to_string(),
                    }
                },
            };
            outcomes.push(SlideOutcome {
                slide_index,
                slide_id,
                result,
            });
        }

        let deleted_count = outcomes.iter().filter(|o| o.result.is_done()).count();
        let requested_count = slide_indices.len();
        debug!(deleted_count, requested_count, "deleted slides");

        Ok(DeleteManyReport {
            deleted_count,
            requested_count,
            remaining_slides: self.store.slide_count(),
            completion: Completion::from_counts(deleted_count, requested_count),
            outcomes,
            before,
            after: self.store.order(),
        })
    }

    /// Duplicate the slide at `slide_index`.
    ///
    /// The copy gets the source's layout and a copy of each of its shapes,
    /// and is placed at `insert_position` (default: right after the source).
    /// `insert_position` is an insertion point and may equal the slide count.
    /// Shapes that cannot be copied are left out and reported as skipped.
    pub fn duplicate_slide(
        &mut self,
        slide_index: usize,
        insert_position: Option<usize>,
    ) -> Result<DuplicateReport> {
        let len = self.store.slide_count();
        Error::check_index("slide_index", slide_index, len)?;
        let position = insert_position.unwrap_or(slide_index + 1);
        let range = IndexRange::insertion_points(len);
        if !range.contains(position) {
            return Err(Error::IndexOutOfRange {
                name: "insert_position",
                value: position,
                range,
            });
        }

        let before = self.store.order();
        let source = self
            .store
            .slide_ref(slide_index)
            .cloned()
            .ok_or_else(|| Error::SlideNotFound(before[slide_index].to_string()))?;
        let layout = self.store.layout_of(&source)?.to_string();
        let new_slide = self.store.clone_slide(&source)?;

        let (copies, outcomes) = match self.copy_shapes(&source, &new_slide) {
            Ok(copied) => copied,
            Err(e) => {
                self.discard(len)?;
                return Err(e);
            },
        };
        let requested_shapes = outcomes.len();
        let copied_shapes = copies.len();
        match self.store.shapes_mut(&new_slide) {
            Ok(target) => {
                for shape in copies {
                    target.push(shape);
                }
            },
            Err(e) => {
                self.discard(len)?;
                return Err(e);
            },
        }

        if position != len
            && let Err(e) = self.relocate(len, position)
        {
            self.discard(len)?;
            return Err(e);
        }
        debug!(
            slide_index,
            new_index = position,
            copied_shapes,
            requested_shapes,
            "duplicated slide"
        );

        Ok(DuplicateReport {
            source_index: slide_index,
            new_index: position,
            new_slide_id: new_slide.id(),
            layout,
            copied_shapes,
            requested_shapes,
            completion: Completion::from_counts(copied_shapes, requested_shapes),
            outcomes,
            before,
            after: self.store.order(),
        })
    }

    fn copy_shapes(
        &self,
        source: &SlideRef,
        target: &SlideRef,
    ) -> Result<(Vec<Shape>, Vec<ShapeOutcome>)> {
        let shapes = self.store.shapes(source)?;
        let mut ids = ShapeIds::starting_at(self.store.shapes(target)?.next_shape_id());

        let mut copies = Vec::with_capacity(shapes.len());
        let mut outcomes = Vec::with_capacity(shapes.len());
        for (shape_index, shape) in shapes.iter().enumerate() {
            let result = match copy_shape(shape, &mut ids) {
                Ok(copy) => {
                    copies.push(copy);
                    ItemResult::Done
                },
                Err(e) => {
                    warn!(shape_index, shape = %shape.name(), error = %e, "shape not copied");
                    ItemResult::Skipped {
                        reason: e.to_string(),
                    }
                },
            };
            outcomes.push(ShapeOutcome {
                shape_index,
                name: shape.name().to_string(),
                kind: shape.kind().tag(),
                result,
            });
        }
        Ok((copies, outcomes))
    }

    /// Drop the slide appended at `index` by a failed duplication.
    fn discard(&mut self, index: usize) -> Result<()> {
        let slide = self.store.remove_slide_ref(index)?;
        self.store.release_slide(&slide)
    }
}
