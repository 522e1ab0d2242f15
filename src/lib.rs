//! Deckwright - structural editing and layout analysis for slide decks
//!
//! This library edits the slide sequence of an in-memory presentation and
//! arranges the shapes placed on its slides.
//!
//! # Features
//!
//! - **Deck surgery**: Move, swap, reorder, delete and duplicate slides with
//!   all-or-nothing validation and before/after snapshots
//! - **Shape duplication**: Per-kind copy of text boxes, pictures, preset
//!   shapes, tables and groups
//! - **Layout engine**: Alignment, even distribution, overlap detection,
//!   alignment suggestions and layout metrics in fixed-point EMU geometry
//! - **Slide queries**: Text search, layout search, text replacement and
//!   text extraction
//! - **Speaker notes**: Read, write, append and clear per-slide notes
//! - **Sessions**: Several open documents addressed by id
//!
//! # Example - Reordering a deck
//!
//! ```rust
//! use deckwright::deck::{Document, SequenceEditor, SlideStore};
//!
//! # fn main() -> Result<(), deckwright::Error> {
//! let mut doc = Document::new();
//! for layout in ["Title Slide", "Title and Content", "Section Header"] {
//!     doc.add_slide(layout);
//! }
//!
//! let mut editor = SequenceEditor::new(&mut doc);
//! let report = editor.reorder_slides(&[2, 0, 1])?;
//! assert_eq!(report.after[0], report.before[2]);
//!
//! editor.delete_slide(1)?;
//! assert_eq!(doc.slide_count(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Aligning shapes
//!
//! ```rust
//! use deckwright::layout::{Direction, LayoutEngine};
//! use deckwright::shapes::{Rect, Shape, ShapeSet};
//!
//! # fn main() -> Result<(), deckwright::Error> {
//! let mut shapes = ShapeSet::new();
//! for (i, left) in [0.5, 2.0, 6.0].into_iter().enumerate() {
//!     let rect = Rect::from_inches(left, 1.0, 1.0, 1.0)?;
//!     shapes.push(Shape::text_box(i as u32 + 2, rect, "box"));
//! }
//!
//! let engine = LayoutEngine::default();
//! let report = engine.distribute(&mut shapes, &[0, 1, 2], Direction::Horizontal)?;
//! assert!((report.gap - 1.75).abs() < 1e-9);
//! assert!(!engine.detect_overlaps(&shapes).has_overlaps);
//! # Ok(())
//! # }
//! ```

/// Error type, unit conversion and YAML helpers
pub mod common;

/// Slide sequence editing, shape duplication and slide queries
pub mod deck;

/// Alignment, distribution, overlap detection and layout metrics
pub mod layout;

pub mod session;

/// Shape model and per-slide shape collections
pub mod shapes;

// Re-export commonly used types for convenience
pub use common::{Error, ErrorKind, Result, ToYaml};
pub use deck::{Document, SequenceEditor, SlideStore};
pub use layout::{LayoutEngine, LayoutOptions};
pub use session::{DocumentId, Session};
