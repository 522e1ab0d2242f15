//! Shapes placed on slides.
//!
//! A slide owns a [`ShapeSet`]: an ordered list of [`Shape`]s whose geometry
//! is an EMU [`Rect`]. The shape kind is a tagged enum ([`ShapeKind`]); the
//! deck editor dispatches its copy strategies on that tag when duplicating
//! slides.
//!
//! # Example
//!
//! ```rust
//! use deckwright::shapes::{Rect, Shape, ShapeSet};
//!
//! let mut shapes = ShapeSet::new();
//! let rect = Rect::from_inches(1.0, 1.0, 2.0, 1.0)?;
//! shapes.push(Shape::text_box(2, rect, "Hello"));
//!
//! let moved = shapes.nudge_shape(0, 0.5, -2.0)?;
//! assert_eq!(moved.new.left, 1.5);
//! assert_eq!(moved.new.top, 0.0);
//! # Ok::<(), deckwright::Error>(())
//! ```

pub mod collection;
pub mod format;
pub mod geometry;
pub mod position;
pub mod shape;
pub mod text;

pub use collection::ShapeSet;
pub use format::{ImageFormat, ParagraphAlignment, RunFont};
pub use geometry::{Bounds, Position, Rect};
pub use position::{ShapeInfo, ShapeUpdate};
pub use shape::{AutoShape, Picture, Shape, ShapeKind, ShapeKindTag, Table};
pub use text::{Paragraph, Run, TextBody};
