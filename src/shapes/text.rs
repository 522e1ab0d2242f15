/// Text content of text-bearing shapes.
use super::format::{ParagraphAlignment, RunFont};
use serde::Serialize;

/// A run of uniformly formatted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub font: RunFont,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: RunFont::default(),
        }
    }

    pub fn with_font(mut self, font: RunFont) -> Self {
        self.font = font;
        self
    }
}

/// A paragraph: alignment, indentation level and runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    pub alignment: Option<ParagraphAlignment>,
    /// Indentation level, 0-8
    pub level: u8,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            alignment: None,
            level: 0,
            runs,
        }
    }

    pub fn with_alignment(mut self, alignment: ParagraphAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.min(8);
        self
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Text frame of a shape.
///
/// A text body always holds at least one paragraph, matching how freshly
/// created text boxes behave.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBody {
    pub word_wrap: Option<bool>,
    pub paragraphs: Vec<Paragraph>,
}

impl Default for TextBody {
    fn default() -> Self {
        Self {
            word_wrap: None,
            paragraphs: vec![Paragraph::default()],
        }
    }
}

impl TextBody {
    /// Build a text body from plain text.
    ///
    /// Each line becomes one paragraph holding a single unformatted run;
    /// empty lines produce empty paragraphs with no runs.
    pub fn from_text(text: &str) -> Self {
        let paragraphs = text
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    Paragraph::default()
                } else {
                    Paragraph::new(vec![Run::new(line)])
                }
            })
            .collect();
        Self {
            word_wrap: None,
            paragraphs,
        }
    }

    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        if paragraphs.is_empty() {
            return Self::default();
        }
        Self {
            word_wrap: None,
            paragraphs,
        }
    }

    /// All text, paragraphs joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Iterate over every run in document order.
    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut Run> {
        self.paragraphs.iter_mut().flat_map(|p| p.runs.iter_mut())
    }

    /// Copy paragraph and run formatting from `source`, position by position.
    ///
    /// Only the overlapping prefix is touched: paragraphs or runs that exist
    /// in `source` but not in `self` are ignored.
    pub fn copy_formatting_from(&mut self, source: &TextBody) {
        self.word_wrap = source.word_wrap;
        for (target, src) in self.paragraphs.iter_mut().zip(&source.paragraphs) {
            target.alignment = src.alignment;
            target.level = src.level;
            for (target_run, src_run) in target.runs.iter_mut().zip(&src.runs) {
                target_run.font.bold = src_run.font.bold;
                target_run.font.italic = src_run.font.italic;
                if src_run.font.size.is_some() {
                    target_run.font.size = src_run.font.size;
                }
                if src_run.font.name.is_some() {
                    target_run.font.name = src_run.font.name.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_splits_paragraphs() {
        let body = TextBody::from_text("Title\n\nBody");
        assert_eq!(body.paragraphs.len(), 3);
        assert_eq!(body.paragraphs[0].runs.len(), 1);
        assert!(body.paragraphs[1].runs.is_empty());
        assert_eq!(body.text(), "Title\n\nBody");
    }

    #[test]
    fn test_default_body_has_one_paragraph() {
        assert_eq!(TextBody::default().paragraphs.len(), 1);
        assert_eq!(TextBody::from_paragraphs(Vec::new()).paragraphs.len(), 1);
    }

    #[test]
    fn test_copy_formatting_prefix_only() {
        let bold = RunFont {
            bold: Some(true),
            size: Some(24.0),
            ..Default::default()
        };
        let italic = RunFont {
            italic: Some(true),
            name: Some("Calibri".to_string()),
            ..Default::default()
        };
        let source = TextBody::from_paragraphs(vec![
            Paragraph::new(vec![
                Run::new("Hello ").with_font(bold.clone()),
                Run::new("world").with_font(italic),
            ])
            .with_alignment(ParagraphAlignment::Center)
            .with_level(1),
        ]);

        let mut target = TextBody::from_text(&source.text());
        target.copy_formatting_from(&source);

        assert_eq!(target.text(), "Hello world");
        assert_eq!(target.paragraphs[0].alignment, Some(ParagraphAlignment::Center));
        assert_eq!(target.paragraphs[0].level, 1);
        // The target only has one run, so only the first run's font is copied.
        assert_eq!(target.paragraphs[0].runs.len(), 1);
        assert_eq!(target.paragraphs[0].runs[0].font, bold);
    }
}
