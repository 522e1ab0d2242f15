/// In-memory presentation document.
use super::store::{SlideId, SlideRef, SlideStore};
use crate::common::unit::SlideDimensions;
use crate::common::{Error, IndexRange, Result};
use crate::shapes::{ShapeSet, TextBody};
use std::collections::HashMap;

/// Default slide width: 10 inches.
pub const DEFAULT_SLIDE_WIDTH: i64 = 9_144_000;
/// Default slide height: 7.5 inches.
pub const DEFAULT_SLIDE_HEIGHT: i64 = 6_858_000;

/// Content of one slide.
#[derive(Debug, Clone)]
pub struct Slide {
    id: SlideId,
    layout: String,
    shapes: ShapeSet,
    /// Speaker notes; `None` until the slide gets a notes page
    pub(crate) notes: Option<TextBody>,
}

impl Slide {
    #[inline]
    pub fn id(&self) -> SlideId {
        self.id
    }

    /// Name of the slide layout, e.g. `Title and Content`.
    #[inline]
    pub fn layout(&self) -> &str {
        &self.layout
    }

    #[inline]
    pub fn shapes(&self) -> &ShapeSet {
        &self.shapes
    }

    #[inline]
    pub fn shapes_mut(&mut self) -> &mut ShapeSet {
        &mut self.shapes
    }

    #[inline]
    pub fn notes(&self) -> Option<&TextBody> {
        self.notes.as_ref()
    }

    /// Text of the title placeholder, if the slide has one.
    pub fn title(&self) -> Option<String> {
        self.shapes.iter().find(|s| s.is_title()).and_then(|s| s.text())
    }
}

/// A presentation held in memory.
///
/// The deck is an ordered list of [`SlideRef`]s; slide content lives in a
/// table keyed by [`SlideId`], so reordering the deck never touches content.
///
/// # Examples
///
/// ```rust
/// use deckwright::deck::{Document, SlideStore};
///
/// let mut doc = Document::new();
/// doc.add_slide("Title Slide");
/// doc.add_slide("Title and Content");
/// assert_eq!(doc.slide_count(), 2);
/// assert_eq!(doc.slide_at(1).unwrap().layout(), "Title and Content");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    deck: Vec<SlideRef>,
    slides: HashMap<SlideId, Slide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    next_slide_id: u32,
    /// rId1 is taken by the slide master relationship
    next_rel_id: u32,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with the default 10" x 7.5" slide size.
    pub fn new() -> Self {
        Self {
            deck: Vec::new(),
            slides: HashMap::new(),
            slide_width: DEFAULT_SLIDE_WIDTH,
            slide_height: DEFAULT_SLIDE_HEIGHT,
            next_slide_id: SlideId::FIRST.0,
            next_rel_id: 2,
        }
    }

    /// Create an empty document with a custom slide size in EMUs.
    pub fn with_dimensions(width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidGeometry(format!(
                "slide size must be positive, got {}x{} EMU",
                width, height
            )));
        }
        Ok(Self {
            slide_width: width,
            slide_height: height,
            ..Self::new()
        })
    }

    /// Slide size in both unit systems.
    pub fn dimensions(&self) -> SlideDimensions {
        SlideDimensions::from_emu(self.slide_width, self.slide_height)
    }

    fn allocate(&mut self, layout: &str) -> SlideRef {
        let id = SlideId(self.next_slide_id);
        let slide_ref = SlideRef::new(id, format!("rId{}", self.next_rel_id));
        self.next_slide_id += 1;
        self.next_rel_id += 1;
        self.slides.insert(
            id,
            Slide {
                id,
                layout: layout.to_string(),
                shapes: ShapeSet::new(),
                notes: None,
            },
        );
        slide_ref
    }

    /// Append a new empty slide using the named layout.
    pub fn add_slide(&mut self, layout: &str) -> SlideRef {
        let slide_ref = self.allocate(layout);
        self.deck.push(slide_ref.clone());
        slide_ref
    }

    pub fn slide(&self, slide: &SlideRef) -> Option<&Slide> {
        self.slides.get(&slide.id)
    }

    /// Slide at a deck position.
    pub fn slide_at(&self, index: usize) -> Result<&Slide> {
        Error::check_index("slide_index", index, self.deck.len())?;
        let id = self.deck[index].id;
        self.slides
            .get(&id)
            .ok_or_else(|| Error::SlideNotFound(id.to_string()))
    }

    pub fn slide_at_mut(&mut self, index: usize) -> Result<&mut Slide> {
        Error::check_index("slide_index", index, self.deck.len())?;
        let id = self.deck[index].id;
        self.slides
            .get_mut(&id)
            .ok_or_else(|| Error::SlideNotFound(id.to_string()))
    }

    /// Slides in deck order.
    pub fn slides(&self) -> impl Iterator<Item = &Slide> {
        self.deck.iter().filter_map(|r| self.slides.get(&r.id))
    }

    fn content(&self, slide: &SlideRef) -> Result<&Slide> {
        self.slides
            .get(&slide.id)
            .ok_or_else(|| Error::SlideNotFound(slide.id.to_string()))
    }

    fn content_mut(&mut self, slide: &SlideRef) -> Result<&mut Slide> {
        self.slides
            .get_mut(&slide.id)
            .ok_or_else(|| Error::SlideNotFound(slide.id.to_string()))
    }
}

impl SlideStore for Document {
    fn slide_count(&self) -> usize {
        self.deck.len()
    }

    fn slide_ref(&self, index: usize) -> Option<&SlideRef> {
        self.deck.get(index)
    }

    fn slide_refs(&self) -> &[SlideRef] {
        &self.deck
    }

    fn remove_slide_ref(&mut self, index: usize) -> Result<SlideRef> {
        Error::check_index("slide_index", index, self.deck.len())?;
        Ok(self.deck.remove(index))
    }

    fn insert_slide_ref(&mut self, index: usize, slide: SlideRef) -> Result<()> {
        let range = IndexRange::insertion_points(self.deck.len());
        if !range.contains(index) {
            return Err(Error::IndexOutOfRange {
                name: "insert_position",
                value: index,
                range,
            });
        }
        if !self.slides.contains_key(&slide.id) {
            return Err(Error::SlideNotFound(slide.id.to_string()));
        }
        if self.deck.iter().any(|r| r.id == slide.id) {
            return Err(Error::DuplicateSlide(slide.id.0));
        }
        self.deck.insert(index, slide);
        Ok(())
    }

    fn clone_slide(&mut self, source: &SlideRef) -> Result<SlideRef> {
        let layout = self.content(source)?.layout.clone();
        Ok(self.add_slide(&layout))
    }

    fn release_slide(&mut self, slide: &SlideRef) -> Result<()> {
        if self.deck.iter().any(|r| r.id == slide.id) {
            return Err(Error::Other(format!(
                "slide {} is still in the deck",
                slide.id
            )));
        }
        self.slides
            .remove(&slide.id)
            .map(|_| ())
            .ok_or_else(|| Error::SlideNotFound(slide.id.to_string()))
    }

    fn layout_of(&self, slide: &SlideRef) -> Result<&str> {
        self.content(slide).map(Slide::layout)
    }

    fn shapes(&self, slide: &SlideRef) -> Result<&ShapeSet> {
        self.content(slide).map(Slide::shapes)
    }

    fn shapes_mut(&mut self, slide: &SlideRef) -> Result<&mut ShapeSet> {
        self.content_mut(slide).map(Slide::shapes_mut)
    }

    fn slide_dimensions(&self) -> (i64, i64) {
        (self.slide_width, self.slide_height)
    }
}
