//! Speaker notes of the slides in a document.
//!
//! A slide has no notes page until notes are first written to it. Clearing
//! the notes empties the page but keeps it.

use super::document::{Document, Slide};
use crate::common::{Result, ToYaml};
use crate::shapes::TextBody;
use serde::Serialize;
use tracing::debug;

/// Separator [`Document::append_slide_notes`] callers usually want.
pub const DEFAULT_NOTES_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideNotes {
    pub slide_index: usize,
    /// Whether the slide has a notes page at all
    pub has_notes_page: bool,
    /// Whether the notes hold any non-blank text
    pub has_notes: bool,
    pub notes_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotesAppendReport {
    pub slide_index: usize,
    pub previous_notes: String,
    pub appended_notes: String,
    pub final_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotesClearReport {
    pub slide_index: usize,
    /// False when the slide had no notes page to clear
    pub had_notes_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideNotesSummary {
    pub slide_index: usize,
    /// First line of the first shape with text, or empty
    pub slide_title: String,
    pub has_notes: bool,
    pub notes_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckNotesReport {
    pub total_slides: usize,
    pub slides_with_notes: usize,
    pub slides: Vec<SlideNotesSummary>,
}

impl ToYaml for SlideNotes {}
impl ToYaml for NotesAppendReport {}
impl ToYaml for NotesClearReport {}
impl ToYaml for DeckNotesReport {}

fn notes_text(slide: &Slide) -> String {
    slide.notes().map(TextBody::text).unwrap_or_default()
}

fn heading(slide: &Slide) -> String {
    slide
        .shapes()
        .iter()
        .filter_map(|s| s.text())
        .find(|t| !t.trim().is_empty())
        .and_then(|t| t.trim().lines().next().map(str::to_string))
        .unwrap_or_default()
}

impl Document {
    /// Notes of the slide at `slide_index`.
    pub fn slide_notes(&self, slide_index: usize) -> Result<SlideNotes> {
        let slide = self.slide_at(slide_index)?;
        let notes_text = notes_text(slide);
        Ok(SlideNotes {
            slide_index,
            has_notes_page: slide.notes().is_some(),
            has_notes: !notes_text.trim().is_empty(),
            notes_text,
        })
    }

    /// Replace the notes of a slide, creating its notes page if needed.
    pub fn set_slide_notes(&mut self, slide_index: usize, text: &str) -> Result<SlideNotes> {
        self.slide_at_mut(slide_index)?.notes = Some(TextBody::from_text(text));
        debug!(slide_index, chars = text.len(), "set slide notes");
        self.slide_notes(slide_index)
    }

    /// Append `text` to the notes of a slide.
    ///
    /// `separator` goes between the existing notes and `text`; it is left
    /// out when the existing notes are blank.
    pub fn append_slide_notes(
        &mut self,
        slide_index: usize,
        text: &str,
        separator: &str,
    ) -> Result<NotesAppendReport> {
        let slide = self.slide_at_mut(slide_index)?;
        let previous_notes = notes_text(slide);
        let final_notes = if previous_notes.trim().is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", previous_notes, separator, text)
        };
        slide.notes = Some(TextBody::from_text(&final_notes));
        debug!(slide_index, "appended slide notes");

        Ok(NotesAppendReport {
            slide_index,
            previous_notes,
            appended_notes: text.to_string(),
            final_notes,
        })
    }

    /// Empty the notes of a slide.
    pub fn clear_slide_notes(&mut self, slide_index: usize) -> Result<NotesClearReport> {
        let slide = self.slide_at_mut(slide_index)?;
        let had_notes_page = slide.notes.is_some();
        if had_notes_page {
            slide.notes = Some(TextBody::default());
            debug!(slide_index, "cleared slide notes");
        }
        Ok(NotesClearReport {
            slide_index,
            had_notes_page,
        })
    }

    /// Notes of every slide in deck order.
    pub fn all_slide_notes(&self) -> DeckNotesReport {
        let slides: Vec<SlideNotesSummary> = self
            .slides()
            .enumerate()
            .map(|(slide_index, slide)| {
                let notes_text = notes_text(slide);
                SlideNotesSummary {
                    slide_index,
                    slide_title: heading(slide),
                    has_notes: !notes_text.trim().is_empty(),
                    notes_text,
                }
            })
            .collect();
        DeckNotesReport {
            total_slides: slides.len(),
            slides_with_notes: slides.iter().filter(|s| s.has_notes).count(),
            slides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{SequenceEditor, SlideStore};
    use crate::shapes::{Rect, Shape};

    fn deck() -> Document {
        let mut doc = Document::new();
        doc.add_slide("Title Slide");
        doc.add_slide("Title and Content");
        let rect = Rect::from_inches(0.5, 0.5, 9.0, 1.0).unwrap();
        doc.slide_at_mut(0)
            .unwrap()
            .shapes_mut()
            .push(Shape::text_box(2, rect, "  \nRoadmap 2027\nDraft").with_placeholder("title"));
        doc
    }

    #[test]
    fn test_slide_without_notes_page() {
        let doc = deck();
        let notes = doc.slide_notes(1).unwrap();
        assert!(!notes.has_notes_page);
        assert!(!notes.has_notes);
        assert_eq!(notes.notes_text, "");

        let err = doc.slide_notes(2).unwrap_err();
        assert_eq!(err.to_string(), "Invalid slide_index: 2. Must be 0-1");
    }

    #[test]
    fn test_set_and_clear() {
        let mut doc = deck();
        let notes = doc.set_slide_notes(0, "Open with the demo\nThen pricing").unwrap();
        assert!(notes.has_notes);
        assert_eq!(notes.notes_text, "Open with the demo\nThen pricing");

        let cleared = doc.clear_slide_notes(0).unwrap();
        assert!(cleared.had_notes_page);
        let notes = doc.slide_notes(0).unwrap();
        assert!(notes.has_notes_page);
        assert!(!notes.has_notes);

        assert!(!doc.clear_slide_notes(1).unwrap().had_notes_page);
        assert!(!doc.slide_notes(1).unwrap().has_notes_page);
    }

    #[test]
    fn test_append_uses_separator_only_after_text() {
        let mut doc = deck();
        let report = doc.append_slide_notes(1, "First point", DEFAULT_NOTES_SEPARATOR).unwrap();
        assert_eq!(report.previous_notes, "");
        assert_eq!(report.final_notes, "First point");

        let report = doc.append_slide_notes(1, "Second point", " | ").unwrap();
        assert_eq!(report.previous_notes, "First point");
        assert_eq!(report.final_notes, "First point | Second point");
        assert_eq!(doc.slide_notes(1).unwrap().notes_text, "First point | Second point");
    }

    #[test]
    fn test_all_slide_notes() {
        let mut doc = deck();
        doc.set_slide_notes(1, "Keep it short").unwrap();
        let report = doc.all_slide_notes();
        assert_eq!(report.total_slides, 2);
        assert_eq!(report.slides_with_notes, 1);
        assert_eq!(report.slides[0].slide_title, "Roadmap 2027");
        assert_eq!(report.slides[1].slide_title, "");
        assert_eq!(report.slides[1].notes_text, "Keep it short");
    }

    #[test]
    fn test_notes_follow_the_slide_when_reordered() {
        let mut doc = deck();
        doc.set_slide_notes(1, "Closing remarks").unwrap();
        SequenceEditor::new(&mut doc).move_slide(1, 0).unwrap();
        assert_eq!(doc.slide_notes(0).unwrap().notes_text, "Closing remarks");
        assert_eq!(doc.slide_count(), 2);
    }
}
