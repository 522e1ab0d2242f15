//! Structural surgery on the slide deck.
//!
//! A [`Document`] owns the deck (the ordered slide references) and the slide
//! content. [`SequenceEditor`] implements move, swap, reorder, delete and
//! duplicate purely from the [`SlideStore`] primitives, so any store can be
//! edited the same way.
//!
//! # Example
//!
//! ```rust
//! use deckwright::deck::{Document, SequenceEditor, SlideStore};
//!
//! let mut doc = Document::new();
//! for layout in ["Title Slide", "Title and Content", "Blank"] {
//!     doc.add_slide(layout);
//! }
//!
//! let mut editor = SequenceEditor::new(&mut doc);
//! editor.swap_slides(0, 2)?;
//! let report = editor.duplicate_slide(0, None)?;
//! assert_eq!(report.new_index, 1);
//! assert_eq!(doc.slide_count(), 4);
//! assert_eq!(doc.slide_at(1)?.layout(), "Blank");
//! # Ok::<(), deckwright::Error>(())
//! ```

pub mod document;
mod duplicate;
pub mod editor;
pub mod extract;
pub mod notes;
pub mod report;
pub mod search;
pub mod store;

pub use document::{Document, Slide};
pub use editor::SequenceEditor;
pub use extract::{DeckText, SlideInfo, SlideText, extract_deck_text, extract_slide_text, slide_info};
pub use notes::{DEFAULT_NOTES_SEPARATOR, DeckNotesReport, SlideNotes};
pub use report::{
    Completion, DeleteManyReport, DeleteReport, DuplicateReport, ItemResult, MoveReport,
    ReorderReport, ShapeOutcome, SlideOutcome, SwapReport,
};
pub use search::{
    MatchType, ReplaceOptions, SearchScope, TextQuery, batch_replace_text, count_slides_by_layout,
    find_slides_by_layout, find_slides_by_text, list_placeholders, placeholder_by_name,
    replace_text,
};
pub use store::{SlideId, SlideRef, SlideStore};
