//! Slide queries and deck-wide text replacement.
//!
//! A slide's title is the text of its first `title`/`ctrTitle` placeholder.
//! Its body is the text of every other text-bearing shape, except shapes
//! whose text equals the title.

use super::store::SlideStore;
use crate::common::{Error, Result, ToYaml};
use aho_corasick::AhoCorasick;
use regex::{NoExpand, Regex, RegexBuilder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, trace};

const NO_TITLE: &str = "(No title)";

/// How the search text is compared with shape text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Substring match; every occurrence counts
    #[default]
    Contains,
    /// The whole shape text must equal the search text
    Exact,
    /// Regular expression; every match counts
    Regex,
}

impl FromStr for MatchType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contains" => Ok(MatchType::Contains),
            "exact" => Ok(MatchType::Exact),
            "regex" => Ok(MatchType::Regex),
            _ => Err(Error::InvalidParameter {
                name: "match_type",
                value: s.to_string(),
                expected: "contains, exact, regex".to_string(),
            }),
        }
    }
}

/// Which text of a slide is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    Title,
    Body,
    #[default]
    All,
}

impl FromStr for SearchScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title" => Ok(SearchScope::Title),
            "body" => Ok(SearchScope::Body),
            "all" => Ok(SearchScope::All),
            _ => Err(Error::InvalidParameter {
                name: "search_in",
                value: s.to_string(),
                expected: "title, body, all".to_string(),
            }),
        }
    }
}

/// A text search over the slides of a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    pub text: String,
    pub match_type: MatchType,
    pub scope: SearchScope,
    pub case_sensitive: bool,
}

impl TextQuery {
    /// Case-insensitive substring search over all text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            match_type: MatchType::Contains,
            scope: SearchScope::All,
            case_sensitive: false,
        }
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// Compiled form of a [`TextQuery`].
enum Matcher {
    /// Literal substring; `fold` lowercases the haystack first
    Contains { automaton: AhoCorasick, fold: bool },
    Exact { text: String, fold: bool },
    Pattern(Regex),
}

impl Matcher {
    fn compile(query: &TextQuery) -> Result<Self> {
        let fold = !query.case_sensitive;
        match query.match_type {
            MatchType::Contains => {
                if query.text.is_empty() {
                    return Err(Error::InvalidParameter {
                        name: "search_text",
                        value: String::new(),
                        expected: "a non-empty string".to_string(),
                    });
                }
                let needle = if fold {
                    query.text.to_lowercase()
                } else {
                    query.text.clone()
                };
                Ok(Matcher::Contains {
                    automaton: AhoCorasick::new([needle])?,
                    fold,
                })
            },
            MatchType::Exact => Ok(Matcher::Exact {
                text: if fold {
                    query.text.to_lowercase()
                } else {
                    query.text.clone()
                },
                fold,
            }),
            MatchType::Regex => Ok(Matcher::Pattern(
                RegexBuilder::new(&query.text)
                    .case_insensitive(fold)
                    .build()?,
            )),
        }
    }

    fn count(&self, text: &str) -> usize {
        match self {
            Matcher::Contains { automaton, fold } => {
                if *fold {
                    automaton.find_iter(&text.to_lowercase()).count()
                } else {
                    automaton.find_iter(text).count()
                }
            },
            Matcher::Exact { text: wanted, fold } => {
                let equal = if *fold {
                    text.to_lowercase() == *wanted
                } else {
                    text == wanted.as_str()
                };
                usize::from(equal)
            },
            Matcher::Pattern(regex) => regex.find_iter(text).count(),
        }
    }
}

/// Title and body texts of one slide.
fn slide_texts<S: SlideStore + ?Sized>(store: &S, index: usize) -> Result<(String, Vec<String>)> {
    let slide = store
        .slide_ref(index)
        .ok_or_else(|| Error::SlideNotFound(format!("index {}", index)))?;
    let shapes = store.shapes(slide)?;
    let title = shapes
        .iter()
        .find(|s| s.is_title())
        .and_then(|s| s.text())
        .unwrap_or_default();
    let body = shapes
        .iter()
        .filter_map(|s| s.text())
        .filter(|t| !t.is_empty() && *t != title)
        .collect();
    Ok((title, body))
}

fn display_title(title: String) -> String {
    if title.is_empty() {
        NO_TITLE.to_string()
    } else {
        title
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideMatch {
    pub slide_index: usize,
    pub title: String,
    pub layout_name: String,
    pub match_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSearchReport {
    pub search_text: String,
    pub match_type: MatchType,
    pub total_matches: usize,
    pub matches: Vec<SlideMatch>,
}

/// Find the slides whose text matches `query`.
pub fn find_slides_by_text<S: SlideStore + ?Sized>(
    store: &S,
    query: &TextQuery,
) -> Result<TextSearchReport> {
    let matcher = Matcher::compile(query)?;
    let mut matches = Vec::new();

    for slide_index in 0..store.slide_count() {
        let (title, body) = slide_texts(store, slide_index)?;
        let mut match_count = 0;
        if matches!(query.scope, SearchScope::Title | SearchScope::All) && !title.is_empty() {
            match_count += matcher.count(&title);
        }
        if matches!(query.scope, SearchScope::Body | SearchScope::All) {
            match_count += body.iter().map(|t| matcher.count(t)).sum::<usize>();
        }

        if match_count > 0 {
            let layout_name = store
                .slide_ref(slide_index)
                .map(|r| store.layout_of(r))
                .transpose()?
                .unwrap_or_default()
                .to_string();
            matches.push(SlideMatch {
                slide_index,
                title: display_title(title),
                layout_name,
                match_count,
            });
        }
    }
    trace!(search_text = %query.text, total = matches.len(), "text search");

    Ok(TextSearchReport {
        search_text: query.text.clone(),
        match_type: query.match_type,
        total_matches: matches.len(),
        matches,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutMatch {
    pub slide_index: usize,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSearchReport {
    pub layout_name: String,
    pub total_matches: usize,
    pub matches: Vec<LayoutMatch>,
}

/// Find the slides using the layout named `layout_name`.
pub fn find_slides_by_layout<S: SlideStore + ?Sized>(
    store: &S,
    layout_name: &str,
) -> Result<LayoutSearchReport> {
    let mut matches = Vec::new();
    for (slide_index, slide) in store.slide_refs().iter().enumerate() {
        if store.layout_of(slide)? == layout_name {
            let (title, _) = slide_texts(store, slide_index)?;
            matches.push(LayoutMatch {
                slide_index,
                title: display_title(title),
            });
        }
    }
    Ok(LayoutSearchReport {
        layout_name: layout_name.to_string(),
        total_matches: matches.len(),
        matches,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutCounts {
    pub total_slides: usize,
    pub by_layout: BTreeMap<String, usize>,
}

/// Number of slides per layout name.
pub fn count_slides_by_layout<S: SlideStore + ?Sized>(store: &S) -> Result<LayoutCounts> {
    let mut by_layout = BTreeMap::new();
    for slide in store.slide_refs() {
        *by_layout.entry(store.layout_of(slide)?.to_string()).or_insert(0) += 1;
    }
    Ok(LayoutCounts {
        total_slides: store.slide_count(),
        by_layout,
    })
}

/// Text replacement compiled once for the whole deck.
enum Replacer {
    Literal(AhoCorasick),
    Pattern(Regex),
}

impl Replacer {
    fn compile(find: &str, case_sensitive: bool, whole_word: bool) -> Result<Self> {
        if find.is_empty() {
            return Err(Error::InvalidParameter {
                name: "find_text",
                value: String::new(),
                expected: "a non-empty string".to_string(),
            });
        }
        if case_sensitive && !whole_word {
            return Ok(Replacer::Literal(AhoCorasick::new([find])?));
        }
        let escaped = regex::escape(find);
        let pattern = if whole_word {
            format!(r"\b{}\b", escaped)
        } else {
            escaped
        };
        Ok(Replacer::Pattern(
            RegexBuilder::new(&pattern)
                .case_insensitive(!case_sensitive)
                .build()?,
        ))
    }

    /// Replace every match in `text`, returning the new text and match count.
    fn apply(&self, text: &str, replacement: &str) -> (String, usize) {
        match self {
            Replacer::Literal(automaton) => {
                let count = automaton.find_iter(text).count();
                if count == 0 {
                    return (text.to_string(), 0);
                }
                (automaton.replace_all(text, &[replacement]), count)
            },
            Replacer::Pattern(regex) => {
                let count = regex.find_iter(text).count();
                if count == 0 {
                    return (text.to_string(), 0);
                }
                (regex.replace_all(text, NoExpand(replacement)).into_owned(), count)
            },
        }
    }
}

/// Options of a deck-wide replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceOptions {
    pub case_sensitive: bool,
    /// Only match the find text at word boundaries
    pub whole_word: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideReplacements {
    pub slide_index: usize,
    pub replacements: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaceReport {
    pub find_text: String,
    pub replace_text: String,
    pub total_replacements: usize,
    pub slides_affected: usize,
    pub details: Vec<SlideReplacements>,
}

/// Replace text in every run of every text-bearing shape of the deck.
///
/// Matching is per run: text split across runs with different formatting
/// is not matched.
pub fn replace_text<S: SlideStore + ?Sized>(
    store: &mut S,
    find_text: &str,
    replace_text: &str,
    options: ReplaceOptions,
) -> Result<ReplaceReport> {
    let replacer = Replacer::compile(find_text, options.case_sensitive, options.whole_word)?;
    let refs = store.slide_refs().to_vec();
    let mut details = Vec::new();

    for (slide_index, slide) in refs.iter().enumerate() {
        let shapes = store.shapes_mut(slide)?;
        let mut replacements = 0;
        for shape_index in 0..shapes.len() {
            let Some(body) = shapes.get_mut(shape_index).and_then(|s| s.text_body_mut()) else {
                continue;
            };
            for run in body.runs_mut() {
                let (new_text, count) = replacer.apply(&run.text, replace_text);
                if count > 0 {
                    run.text = new_text;
                    replacements += count;
                }
            }
        }
        if replacements > 0 {
            details.push(SlideReplacements {
                slide_index,
                replacements,
            });
        }
    }

    let total_replacements = details.iter().map(|d| d.replacements).sum();
    debug!(find_text, total_replacements, "replaced text");
    Ok(ReplaceReport {
        find_text: find_text.to_string(),
        replace_text: replace_text.to_string(),
        total_replacements,
        slides_affected: details.len(),
        details,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReplacement {
    pub find_text: String,
    pub replace_text: String,
    pub replacements: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReplaceReport {
    pub total_replacements: usize,
    pub replacement_count: usize,
    pub details: Vec<BatchReplacement>,
}

/// Apply several replacements in order. Each pair sees the result of the
/// previous ones.
pub fn batch_replace_text<S: SlideStore + ?Sized>(
    store: &mut S,
    pairs: &[(&str, &str)],
    case_sensitive: bool,
) -> Result<BatchReplaceReport> {
    let options = ReplaceOptions {
        case_sensitive,
        whole_word: false,
    };
    // Compile everything first so a bad pair changes nothing.
    for (find, _) in pairs {
        Replacer::compile(find, case_sensitive, false)?;
    }

    let mut details = Vec::with_capacity(pairs.len());
    for (find, replace) in pairs {
        let report = replace_text(&mut *store, find, replace, options)?;
        details.push(BatchReplacement {
            find_text: find.to_string(),
            replace_text: replace.to_string(),
            replacements: report.total_replacements,
        });
    }
    Ok(BatchReplaceReport {
        total_replacements: details.iter().map(|d| d.replacements).sum(),
        replacement_count: pairs.len(),
        details,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderInfo {
    pub shape_index: usize,
    /// Placeholder type, e.g. `title` or `body`
    pub placeholder_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderList {
    pub slide_index: usize,
    pub layout_name: String,
    pub placeholders: Vec<PlaceholderInfo>,
}

/// Placeholders of the slide at `slide_index`.
pub fn list_placeholders<S: SlideStore + ?Sized>(
    store: &S,
    slide_index: usize,
) -> Result<PlaceholderList> {
    Error::check_index("slide_index", slide_index, store.slide_count())?;
    let slide = store
        .slide_ref(slide_index)
        .ok_or_else(|| Error::SlideNotFound(format!("index {}", slide_index)))?;
    let placeholders = store
        .shapes(slide)?
        .iter()
        .enumerate()
        .filter_map(|(shape_index, shape)| {
            shape.placeholder().map(|kind| PlaceholderInfo {
                shape_index,
                placeholder_type: kind.to_string(),
                name: shape.name().to_string(),
            })
        })
        .collect();
    Ok(PlaceholderList {
        slide_index,
        layout_name: store.layout_of(slide)?.to_string(),
        placeholders,
    })
}

/// The placeholder named `name` on the slide at `slide_index`, if any.
pub fn placeholder_by_name<S: SlideStore + ?Sized>(
    store: &S,
    slide_index: usize,
    name: &str,
) -> Result<Option<PlaceholderInfo>> {
    Ok(list_placeholders(store, slide_index)?
        .placeholders
        .into_iter()
        .find(|p| p.name == name))
}

impl ToYaml for TextSearchReport {}
impl ToYaml for LayoutSearchReport {}
impl ToYaml for LayoutCounts {}
impl ToYaml for ReplaceReport {}
impl ToYaml for BatchReplaceReport {}
impl ToYaml for PlaceholderList {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Document;
    use crate::shapes::{Paragraph, Rect, Run, Shape, ShapeKind, TextBody};

    fn rect() -> Rect {
        Rect::from_inches(0.5, 0.5, 9.0, 1.0).unwrap()
    }

    fn sample() -> Document {
        let mut doc = Document::new();
        let slides = [
            ("Title Slide", "Terraform Basics", "Infrastructure as code with terraform"),
            ("Title and Content", "Modules", "Reusable modules. Terraform registry."),
            ("Title and Content", "", "Closing notes"),
        ];
        for (i, (layout, title, body)) in slides.iter().enumerate() {
            doc.add_slide(layout);
            let shapes = doc.slide_at_mut(i).unwrap().shapes_mut();
            if !title.is_empty() {
                shapes.push(
                    Shape::text_box(2, rect(), title)
                        .with_placeholder("title")
                        .with_name("Title 1"),
                );
            }
            shapes.push(
                Shape::text_box(3, rect(), body)
                    .with_placeholder("body")
                    .with_name("Content Placeholder 2"),
            );
        }
        doc
    }

    #[test]
    fn test_contains_counts_occurrences() {
        let doc = sample();
        let report = find_slides_by_text(&doc, &TextQuery::new("terraform")).unwrap();
        assert_eq!(report.total_matches, 2);
        assert_eq!(report.matches[0].match_count, 2);
        assert_eq!(report.matches[0].title, "Terraform Basics");
        assert_eq!(report.matches[1].layout_name, "Title and Content");

        let sensitive = TextQuery::new("terraform").with_case_sensitive(true);
        let report = find_slides_by_text(&doc, &sensitive).unwrap();
        assert_eq!(report.total_matches, 1);
        assert_eq!(report.matches[0].match_count, 1);
    }

    #[test]
    fn test_scopes_and_match_types() {
        let doc = sample();
        let title_only = TextQuery::new("modules").with_scope(SearchScope::Title);
        let report = find_slides_by_text(&doc, &title_only).unwrap();
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].match_count, 1);

        let exact = TextQuery::new("closing notes").with_match_type(MatchType::Exact);
        let report = find_slides_by_text(&doc, &exact).unwrap();
        assert_eq!(report.matches[0].slide_index, 2);
        assert_eq!(report.matches[0].title, "(No title)");

        let regex = TextQuery::new(r"modul\w+").with_match_type(MatchType::Regex);
        assert_eq!(find_slides_by_text(&doc, &regex).unwrap().matches[0].match_count, 2);

        let bad = TextQuery::new("(").with_match_type(MatchType::Regex);
        assert!(matches!(
            find_slides_by_text(&doc, &bad),
            Err(Error::InvalidPattern(_))
        ));
        assert!("fuzzy".parse::<MatchType>().is_err());
    }

    #[test]
    fn test_layout_queries() {
        let doc = sample();
        let report = find_slides_by_layout(&doc, "Title and Content").unwrap();
        assert_eq!(report.total_matches, 2);
        assert_eq!(report.matches[0].title, "Modules");

        let counts = count_slides_by_layout(&doc).unwrap();
        assert_eq!(counts.total_slides, 3);
        assert_eq!(counts.by_layout["Title and Content"], 2);
        assert_eq!(counts.by_layout["Title Slide"], 1);
    }

    #[test]
    fn test_replace_text() {
        let mut doc = sample();
        let report = replace_text(&mut doc, "terraform", "OpenTofu", ReplaceOptions::default()).unwrap();
        assert_eq!(report.total_replacements, 3);
        assert_eq!(report.slides_affected, 2);
        assert_eq!(doc.slide_at(0).unwrap().title().as_deref(), Some("OpenTofu Basics"));
    }

    #[test]
    fn test_replace_whole_word_and_case() {
        let mut doc = Document::new();
        doc.add_slide("Blank");
        let body = TextBody::from_paragraphs(vec![Paragraph::new(vec![
            Run::new("AWS and AWSome "),
            Run::new("aws"),
        ])]);
        doc.slide_at_mut(0)
            .unwrap()
            .shapes_mut()
            .push(Shape::new(2, rect(), ShapeKind::Text(body)));

        let options = ReplaceOptions {
            case_sensitive: true,
            whole_word: true,
        };
        let report = replace_text(&mut doc, "AWS", "Amazon", options).unwrap();
        assert_eq!(report.total_replacements, 1);
        let text = doc.slide_at(0).unwrap().shapes().get(0).unwrap().text().unwrap();
        assert_eq!(text, "Amazon and AWSome aws");

        let report = replace_text(&mut doc, "aws", "X", ReplaceOptions::default()).unwrap();
        assert_eq!(report.total_replacements, 2);
    }

    #[test]
    fn test_batch_replace() {
        let mut doc = sample();
        let report =
            batch_replace_text(&mut doc, &[("Modules", "Packages"), ("Packages", "Crates")], true)
                .unwrap();
        assert_eq!(report.replacement_count, 2);
        assert_eq!(report.details[0].replacements, 1);
        assert_eq!(report.details[1].replacements, 1);
        assert_eq!(doc.slide_at(1).unwrap().title().as_deref(), Some("Crates"));

        assert!(batch_replace_text(&mut doc, &[("ok", "x"), ("", "y")], false).is_err());
    }

    #[test]
    fn test_placeholders() {
        let doc = sample();
        let list = list_placeholders(&doc, 0).unwrap();
        assert_eq!(list.layout_name, "Title Slide");
        assert_eq!(list.placeholders.len(), 2);
        assert_eq!(list.placeholders[0].placeholder_type, "title");

        let found = placeholder_by_name(&doc, 1, "Content Placeholder 2").unwrap();
        assert_eq!(found.map(|p| p.shape_index), Some(1));
        assert_eq!(placeholder_by_name(&doc, 1, "Footer").unwrap(), None);
        assert!(list_placeholders(&doc, 3).is_err());
    }
}
