//! Slide descriptions and text extraction.
//!
//! Text is trimmed per shape and blank shapes are left out. The title
//! placeholder counts once in the combined text even though it is also
//! listed among the placeholders.

use super::search::{PlaceholderInfo, list_placeholders};
use super::store::SlideStore;
use crate::common::{Error, Result, ToYaml};
use crate::shapes::{ShapeInfo, ShapeKind, ShapeKindTag};
use serde::Serialize;
use tracing::trace;

/// Layout, placeholders and shapes of one slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideInfo {
    pub slide_index: usize,
    pub layout_name: String,
    pub placeholder_count: usize,
    pub placeholders: Vec<PlaceholderInfo>,
    pub shape_count: usize,
    pub shapes: Vec<ShapeInfo>,
}

/// Text of one text-bearing shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeText {
    pub shape_index: usize,
    pub shape_name: String,
    pub kind: ShapeKindTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_type: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRowText {
    pub row: usize,
    /// Non-blank cells of the row, trimmed
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableText {
    pub shape_index: usize,
    pub shape_name: String,
    pub rows: Vec<TableRowText>,
}

/// All text of one slide, grouped by where it comes from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideText {
    pub slide_index: usize,
    pub layout_name: String,
    /// Trimmed title placeholder text, empty when there is none
    pub slide_title: String,
    pub placeholders: Vec<ShapeText>,
    pub text_shapes: Vec<ShapeText>,
    pub table_text: Vec<TableText>,
    /// Every extracted piece of text, one per line
    pub all_text_combined: String,
    pub total_text_shapes: usize,
    pub has_title: bool,
    pub has_tables: bool,
}

/// Text of a whole deck with per-deck totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckText {
    pub total_slides: usize,
    pub slides_with_text: usize,
    pub total_text_shapes: usize,
    pub slides_with_titles: usize,
    pub slides_with_tables: usize,
    pub slides: Vec<SlideText>,
    /// Per-slide combined text under `=== SLIDE n ===` headers, 1-based
    pub all_text_combined: String,
}

impl ToYaml for SlideInfo {}
impl ToYaml for SlideText {}
impl ToYaml for DeckText {}

/// Describe the slide at `slide_index`.
pub fn slide_info<S: SlideStore + ?Sized>(store: &S, slide_index: usize) -> Result<SlideInfo> {
    let placeholders = list_placeholders(store, slide_index)?;
    let slide = store
        .slide_ref(slide_index)
        .ok_or_else(|| Error::SlideNotFound(format!("index {}", slide_index)))?;
    let set = store.shapes(slide)?;
    let shapes = (0..set.len())
        .map(|i| set.shape_info(i))
        .collect::<Result<Vec<_>>>()?;

    Ok(SlideInfo {
        slide_index,
        layout_name: placeholders.layout_name,
        placeholder_count: placeholders.placeholders.len(),
        placeholders: placeholders.placeholders,
        shape_count: shapes.len(),
        shapes,
    })
}

/// Extract the text of the slide at `slide_index`.
pub fn extract_slide_text<S: SlideStore + ?Sized>(store: &S, slide_index: usize) -> Result<SlideText> {
    Error::check_index("slide_index", slide_index, store.slide_count())?;
    let slide = store
        .slide_ref(slide_index)
        .ok_or_else(|| Error::SlideNotFound(format!("index {}", slide_index)))?;
    let shapes = store.shapes(slide)?;

    let title_index = shapes.iter().position(|s| s.is_title());
    let slide_title = title_index
        .and_then(|i| shapes.get(i))
        .and_then(|s| s.text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    let mut all_texts = Vec::new();
    if !slide_title.is_empty() {
        all_texts.push(slide_title.clone());
    }
    let mut placeholders = Vec::new();
    let mut text_shapes = Vec::new();
    let mut table_text = Vec::new();

    for (shape_index, shape) in shapes.iter().enumerate() {
        if let ShapeKind::Table(table) = shape.kind() {
            let rows: Vec<TableRowText> = table
                .rows
                .iter()
                .enumerate()
                .filter_map(|(row, cells)| {
                    let cells: Vec<String> = cells
                        .iter()
                        .map(|c| c.trim())
                        .filter(|c| !c.is_empty())
                        .map(str::to_string)
                        .collect();
                    (!cells.is_empty()).then_some(TableRowText { row, cells })
                })
                .collect();
            if !rows.is_empty() {
                all_texts.extend(rows.iter().flat_map(|r| r.cells.iter().cloned()));
                table_text.push(TableText {
                    shape_index,
                    shape_name: shape.name().to_string(),
                    rows,
                });
            }
            continue;
        }

        let Some(text) = shape.text() else {
            continue;
        };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if Some(shape_index) != title_index {
            all_texts.push(text.to_string());
        }
        let item = ShapeText {
            shape_index,
            shape_name: shape.name().to_string(),
            kind: shape.kind().tag(),
            placeholder_type: shape.placeholder().map(str::to_string),
            text: text.to_string(),
        };
        if shape.is_placeholder() {
            placeholders.push(item);
        } else {
            text_shapes.push(item);
        }
    }
    trace!(slide_index, pieces = all_texts.len(), "extracted slide text");

    Ok(SlideText {
        slide_index,
        layout_name: store.layout_of(slide)?.to_string(),
        has_title: !slide_title.is_empty(),
        has_tables: !table_text.is_empty(),
        total_text_shapes: placeholders.len() + text_shapes.len(),
        slide_title,
        placeholders,
        text_shapes,
        table_text,
        all_text_combined: all_texts.join("\n"),
    })
}

/// Extract the text of every slide in deck order.
pub fn extract_deck_text<S: SlideStore + ?Sized>(store: &S) -> Result<DeckText> {
    let slides = (0..store.slide_count())
        .map(|i| extract_slide_text(store, i))
        .collect::<Result<Vec<_>>>()?;

    let mut combined = Vec::new();
    for slide in slides.iter().filter(|s| !s.all_text_combined.is_empty()) {
        combined.push(format!("=== SLIDE {} ===", slide.slide_index + 1));
        combined.push(slide.all_text_combined.clone());
        combined.push(String::new());
    }

    Ok(DeckText {
        total_slides: slides.len(),
        slides_with_text: slides.iter().filter(|s| !s.all_text_combined.is_empty()).count(),
        total_text_shapes: slides.iter().map(|s| s.total_text_shapes).sum(),
        slides_with_titles: slides.iter().filter(|s| s.has_title).count(),
        slides_with_tables: slides.iter().filter(|s| s.has_tables).count(),
        slides,
        all_text_combined: combined.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Document;
    use crate::shapes::{Rect, Shape};

    fn rect() -> Rect {
        Rect::from_inches(1.0, 1.0, 4.0, 1.0).unwrap()
    }

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.add_slide("Title and Content");
        doc.add_slide("Blank");
        doc.add_slide("Title Only");

        let shapes = doc.slide_at_mut(0).unwrap().shapes_mut();
        shapes.push(
            Shape::text_box(2, rect(), "  Quarterly Results ")
                .with_placeholder("title")
                .with_name("Title 1"),
        );
        shapes.push(
            Shape::text_box(3, rect(), "Revenue up")
                .with_placeholder("body")
                .with_name("Content Placeholder 2"),
        );
        shapes.push(Shape::text_box(4, rect(), "Source: finance"));
        shapes.push(Shape::text_box(5, rect(), "   "));
        shapes.push(Shape::table(
            6,
            rect(),
            vec![
                vec!["Region".into(), " Sales ".into()],
                vec![" ".into(), "".into()],
                vec!["EMEA".into(), "42".into()],
            ],
        ));
        shapes.push(Shape::unsupported(7, rect(), "graphicFrame/chart"));

        doc.slide_at_mut(2)
            .unwrap()
            .shapes_mut()
            .push(Shape::text_box(2, rect(), "").with_placeholder("title"));
        doc
    }

    #[test]
    fn test_slide_info() {
        let doc = sample();
        let info = slide_info(&doc, 0).unwrap();
        assert_eq!(info.layout_name, "Title and Content");
        assert_eq!(info.placeholder_count, 2);
        assert_eq!(info.placeholders[1].name, "Content Placeholder 2");
        assert_eq!(info.shape_count, 6);
        assert_eq!(info.shapes[4].kind, ShapeKindTag::Table);
        assert_eq!(info.shapes[0].left_emu, 914_400);

        let empty = slide_info(&doc, 1).unwrap();
        assert_eq!(empty.shape_count, 0);
        assert!(slide_info(&doc, 3).is_err());
    }

    #[test]
    fn test_extract_slide_text() {
        let doc = sample();
        let text = extract_slide_text(&doc, 0).unwrap();
        assert_eq!(text.slide_title, "Quarterly Results");
        assert!(text.has_title);
        assert_eq!(text.placeholders.len(), 2);
        assert_eq!(text.placeholders[0].placeholder_type.as_deref(), Some("title"));
        assert_eq!(text.text_shapes.len(), 1);
        assert_eq!(text.text_shapes[0].text, "Source: finance");
        assert_eq!(text.total_text_shapes, 3);

        assert!(text.has_tables);
        let rows = &text.table_text[0].rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec!["Region", "Sales"]);
        assert_eq!(rows[1].row, 2);

        assert_eq!(
            text.all_text_combined,
            "Quarterly Results\nRevenue up\nSource: finance\nRegion\nSales\nEMEA\n42"
        );
    }

    #[test]
    fn test_blank_title_is_not_a_title() {
        let doc = sample();
        let text = extract_slide_text(&doc, 2).unwrap();
        assert!(!text.has_title);
        assert_eq!(text.all_text_combined, "");
        assert_eq!(text.total_text_shapes, 0);

        let err = extract_slide_text(&doc, 5).unwrap_err();
        assert_eq!(err.to_string(), "Invalid slide_index: 5. Must be 0-2");
    }

    #[test]
    fn test_extract_deck_text() {
        let doc = sample();
        let deck = extract_deck_text(&doc).unwrap();
        assert_eq!(deck.total_slides, 3);
        assert_eq!(deck.slides_with_text, 1);
        assert_eq!(deck.slides_with_titles, 1);
        assert_eq!(deck.slides_with_tables, 1);
        assert_eq!(deck.total_text_shapes, 3);
        assert_eq!(deck.slides[1].layout_name, "Blank");
        assert!(deck.all_text_combined.starts_with("=== SLIDE 1 ===\nQuarterly Results\n"));
        assert!(deck.all_text_combined.ends_with("EMEA\n42\n"));

        let empty = extract_deck_text(&Document::new()).unwrap();
        assert_eq!(empty.total_slides, 0);
        assert_eq!(empty.all_text_combined, "");
    }
}
