/// Slide handles and the store primitives the editor is built on.
use crate::common::Result;
use crate::shapes::ShapeSet;
use serde::Serialize;
use std::fmt;

/// Identifier of a slide, unique within a document.
///
/// Slide ids start at 256, as in the `p:sldIdLst` of a presentation part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SlideId(pub u32);

impl SlideId {
    /// First slide id handed out by a fresh document.
    pub const FIRST: SlideId = SlideId(256);
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to a slide in a deck: its id plus the relationship id
/// through which the presentation part references it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SlideRef {
    pub(crate) id: SlideId,
    pub(crate) rel_id: String,
}

impl SlideRef {
    pub fn new(id: SlideId, rel_id: impl Into<String>) -> Self {
        Self {
            id,
            rel_id: rel_id.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> SlideId {
        self.id
    }

    #[inline]
    pub fn rel_id(&self) -> &str {
        &self.rel_id
    }
}

/// Primitive operations over a document's deck.
///
/// Positions are 0-based and recomputed after every mutation; a slide's
/// position is never stored. Implementations must reject a reference that
/// is already in the deck.
pub trait SlideStore {
    /// Number of slides in the deck.
    fn slide_count(&self) -> usize;

    /// Reference at `index`, if any.
    fn slide_ref(&self, index: usize) -> Option<&SlideRef>;

    /// All references in deck order.
    fn slide_refs(&self) -> &[SlideRef];

    /// Remove and return the reference at `index`. The slide's content stays
    /// in the store until [`SlideStore::release_slide`].
    fn remove_slide_ref(&mut self, index: usize) -> Result<SlideRef>;

    /// Insert a reference at insertion point `index` (`0..=slide_count`).
    fn insert_slide_ref(&mut self, index: usize, slide: SlideRef) -> Result<()>;

    /// Create a slide with the same layout as `source` and no shapes,
    /// appended at the end of the deck.
    fn clone_slide(&mut self, source: &SlideRef) -> Result<SlideRef>;

    /// Drop the content of a slide no longer in the deck.
    fn release_slide(&mut self, slide: &SlideRef) -> Result<()>;

    /// Layout name of a slide.
    fn layout_of(&self, slide: &SlideRef) -> Result<&str>;

    fn shapes(&self, slide: &SlideRef) -> Result<&ShapeSet>;

    fn shapes_mut(&mut self, slide: &SlideRef) -> Result<&mut ShapeSet>;

    /// Slide width and height in EMUs.
    fn slide_dimensions(&self) -> (i64, i64);

    /// Slide ids in deck order.
    fn order(&self) -> Vec<SlideId> {
        self.slide_refs().iter().map(SlideRef::id).collect()
    }
}
