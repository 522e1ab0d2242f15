//! Unified error types for deckwright.
//!
//! Every fallible operation in the crate reports one of these variants.
//! Validation variants are raised before any state is touched, so a caller
//! receiving one can assume the deck or shape set is unchanged.
use std::fmt;
use thiserror::Error;

/// Valid index range of a collection, used in validation messages.
///
/// Renders as `0-N` for a non-empty collection, or `none (empty)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    /// Inclusive upper bound; `None` when no index is valid.
    pub max: Option<usize>,
}

impl IndexRange {
    /// Range of existing slots in a collection of `len` items (`0..=len-1`).
    #[inline]
    pub fn slots(len: usize) -> Self {
        Self {
            max: len.checked_sub(1),
        }
    }

    /// Range of insertion points in a collection of `len` items (`0..=len`).
    #[inline]
    pub fn insertion_points(len: usize) -> Self {
        Self { max: Some(len) }
    }

    /// Check whether `index` lies within the range.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.max.is_some_and(|max| index <= max)
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "0-{}", max),
            None => f.write_str("none (empty)"),
        }
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input; nothing was mutated.
    Validation,
    /// A shape kind with no copy strategy.
    UnsupportedShape,
    /// A document, slide or shape that does not exist.
    NotFound,
    /// Invalid or unreadable configuration.
    Config,
    /// Underlying IO failure.
    Io,
    /// Anything else.
    Other,
}

/// Main error type for deckwright operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Index outside the valid range
    #[error("Invalid {name}: {value}. Must be {range}")]
    IndexOutOfRange {
        name: &'static str,
        value: usize,
        range: IndexRange,
    },

    /// Permutation of the wrong length
    #[error("new_order must contain {expected} indices, got {got}")]
    PermutationLength { expected: usize, got: usize },

    /// Permutation that repeats or skips an index
    #[error("new_order must contain all indices {range} exactly once, found {found}")]
    NotAPermutation { range: IndexRange, found: usize },

    /// Batch request naming the same index more than once
    #[error("Duplicate indices found: {indices:?}")]
    DuplicateIndices { indices: Vec<usize> },

    /// Too few shapes for a multi-shape operation
    #[error("At least {required} shapes are required for {operation}, got {got}")]
    InsufficientShapes {
        operation: &'static str,
        required: usize,
        got: usize,
    },

    /// Parameter with a value outside its domain
    #[error("Invalid {name}: '{value}'. Valid values: {expected}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        expected: String,
    },

    /// Shape geometry with a non-positive size or an edge out of range
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Search or name pattern that failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Picture payload that is not a recognised image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Shape kind without a copy strategy
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// Slide reference already present in the deck
    #[error("Slide {0} is already in the deck")]
    DuplicateSlide(u32),

    /// Slide reference unknown to the store
    #[error("Slide not found: {0}")]
    SlideNotFound(String),

    /// Session lookup failure
    #[error("No presentation with id '{0}' is loaded")]
    DocumentNotFound(String),

    /// Session has no current document
    #[error("No presentation is currently loaded")]
    NoCurrentDocument,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IndexOutOfRange { .. }
            | Error::PermutationLength { .. }
            | Error::NotAPermutation { .. }
            | Error::DuplicateIndices { .. }
            | Error::InsufficientShapes { .. }
            | Error::InvalidParameter { .. }
            | Error::InvalidGeometry(_)
            | Error::InvalidPattern(_)
            | Error::InvalidImage(_)
            | Error::DuplicateSlide(_) => ErrorKind::Validation,
            Error::UnsupportedShape(_) => ErrorKind::UnsupportedShape,
            Error::SlideNotFound(_) | Error::DocumentNotFound(_) | Error::NoCurrentDocument => {
                ErrorKind::NotFound
            },
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Check an index against the slots of a collection of `len` items.
    pub(crate) fn check_index(name: &'static str, value: usize, len: usize) -> Result<()> {
        let range = IndexRange::slots(len);
        if range.contains(value) {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { name, value, range })
        }
    }
}

/// Result type for deckwright operations.
pub type Result<T> = std::result::Result<T, Error>;
