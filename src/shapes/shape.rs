/// Shape types placed on slides.
use super::format::ImageFormat;
use super::geometry::Rect;
use super::text::TextBody;
use crate::common::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Image payload of a picture shape.
///
/// The picture owns its bytes. Two pictures never share a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub(crate) data: Vec<u8>,
    pub(crate) format: ImageFormat,
    pub(crate) description: String,
}

impl Picture {
    /// Create a picture from image bytes, detecting the format.
    pub fn from_bytes(data: Vec<u8>, description: impl Into<String>) -> Result<Self> {
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| Error::InvalidImage("Unknown image format".to_string()))?;
        Ok(Self {
            data,
            format,
            description: description.into(),
        })
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A preset geometry shape (rectangle, ellipse, ...), optionally with text.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoShape {
    /// Preset geometry name, e.g. `rect` or `ellipse`
    pub preset: String,
    /// Fill color in hex RGB
    pub fill_color: Option<String>,
    pub text: Option<TextBody>,
}

/// A table, reduced to its cell text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Shape kind with its kind-specific content.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// A text box (p:sp with txBody)
    Text(TextBody),
    /// A picture (p:pic)
    Picture(Picture),
    /// A preset geometry shape
    AutoShape(AutoShape),
    /// A table graphic frame
    Table(Table),
    /// A group shape (p:grpSp); child geometry is slide-absolute
    Group(Vec<Shape>),
    /// Anything without a model here (charts, OLE objects, media, ...)
    Unsupported { element: String },
}

impl ShapeKind {
    pub fn tag(&self) -> ShapeKindTag {
        match self {
            ShapeKind::Text(_) => ShapeKindTag::TextBox,
            ShapeKind::Picture(_) => ShapeKindTag::Picture,
            ShapeKind::AutoShape(_) => ShapeKindTag::AutoShape,
            ShapeKind::Table(_) => ShapeKindTag::Table,
            ShapeKind::Group(_) => ShapeKindTag::Group,
            ShapeKind::Unsupported { .. } => ShapeKindTag::Unsupported,
        }
    }
}

/// Shape kind without content, for queries and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKindTag {
    TextBox,
    Picture,
    AutoShape,
    Table,
    Group,
    Unsupported,
}

static SHAPE_KIND_NAMES: phf::Map<&'static str, ShapeKindTag> = phf::phf_map! {
    "textbox" => ShapeKindTag::TextBox,
    "text_box" => ShapeKindTag::TextBox,
    "picture" => ShapeKindTag::Picture,
    "image" => ShapeKindTag::Picture,
    "autoshape" => ShapeKindTag::AutoShape,
    "auto_shape" => ShapeKindTag::AutoShape,
    "table" => ShapeKindTag::Table,
    "group" => ShapeKindTag::Group,
    "unsupported" => ShapeKindTag::Unsupported,
};

impl ShapeKindTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextBox => "text_box",
            Self::Picture => "picture",
            Self::AutoShape => "auto_shape",
            Self::Table => "table",
            Self::Group => "group",
            Self::Unsupported => "unsupported",
        }
    }
}

impl FromStr for ShapeKindTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SHAPE_KIND_NAMES
            .get(s.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| Error::InvalidParameter {
                name: "shape type",
                value: s.to_string(),
                expected: "textbox, picture, autoshape, table, group, unsupported".to_string(),
            })
    }
}

impl fmt::Display for ShapeKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shape on a slide.
///
/// # Examples
///
/// ```rust
/// use deckwright::shapes::{Rect, Shape};
///
/// let rect = Rect::from_inches(1.0, 1.0, 3.0, 1.0).unwrap();
/// let shape = Shape::text_box(3, rect, "Hello").with_name("Greeting");
/// assert_eq!(shape.text().as_deref(), Some("Hello"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Shape ID, unique within its slide
    pub(crate) shape_id: u32,
    pub(crate) name: String,
    pub(crate) geometry: Rect,
    /// Placeholder type (`title`, `body`, `ctrTitle`, ...) if this is a placeholder
    pub(crate) placeholder: Option<String>,
    pub(crate) kind: ShapeKind,
}

impl Shape {
    pub fn new(shape_id: u32, geometry: Rect, kind: ShapeKind) -> Self {
        let name = default_name(shape_id, &kind);
        Self {
            shape_id,
            name,
            geometry,
            placeholder: None,
            kind,
        }
    }

    /// Create a new text box shape.
    pub fn text_box(shape_id: u32, geometry: Rect, text: &str) -> Self {
        Self::new(shape_id, geometry, ShapeKind::Text(TextBody::from_text(text)))
    }

    /// Create a picture shape from image bytes.
    pub fn picture(shape_id: u32, geometry: Rect, data: Vec<u8>, description: &str) -> Result<Self> {
        let picture = Picture::from_bytes(data, description)?;
        Ok(Self::new(shape_id, geometry, ShapeKind::Picture(picture)))
    }

    /// Create a preset geometry shape (`rect`, `ellipse`, ...).
    pub fn auto_shape(
        shape_id: u32,
        geometry: Rect,
        preset: &str,
        fill_color: Option<String>,
    ) -> Self {
        Self::new(
            shape_id,
            geometry,
            ShapeKind::AutoShape(AutoShape {
                preset: preset.to_string(),
                fill_color,
                text: None,
            }),
        )
    }

    pub fn table(shape_id: u32, geometry: Rect, rows: Vec<Vec<String>>) -> Self {
        Self::new(shape_id, geometry, ShapeKind::Table(Table { rows }))
    }

    pub fn group(shape_id: u32, geometry: Rect, children: Vec<Shape>) -> Self {
        Self::new(shape_id, geometry, ShapeKind::Group(children))
    }

    /// Create a shape of a kind that has no content model (e.g. `graphicFrame/chart`).
    pub fn unsupported(shape_id: u32, geometry: Rect, element: &str) -> Self {
        Self::new(
            shape_id,
            geometry,
            ShapeKind::Unsupported {
                element: element.to_string(),
            },
        )
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    #[inline]
    pub(crate) fn set_geometry(&mut self, geometry: Rect) {
        self.geometry = geometry;
    }

    #[inline]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    #[inline]
    pub fn kind_mut(&mut self) -> &mut ShapeKind {
        &mut self.kind
    }

    #[inline]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Whether this is a title placeholder.
    pub fn is_title(&self) -> bool {
        matches!(self.placeholder.as_deref(), Some("title" | "ctrTitle"))
    }

    /// Text frame, if this shape carries one.
    pub fn text_body(&self) -> Option<&TextBody> {
        match &self.kind {
            ShapeKind::Text(body) => Some(body),
            ShapeKind::AutoShape(auto) => auto.text.as_ref(),
            _ => None,
        }
    }

    pub fn text_body_mut(&mut self) -> Option<&mut TextBody> {
        match &mut self.kind {
            ShapeKind::Text(body) => Some(body),
            ShapeKind::AutoShape(auto) => auto.text.as_mut(),
            _ => None,
        }
    }

    /// Extract text content from this shape if it has any.
    ///
    /// Returns None if the shape doesn't contain text (e.g., pictures).
    pub fn text(&self) -> Option<String> {
        self.text_body().map(TextBody::text)
    }
}

fn default_name(shape_id: u32, kind: &ShapeKind) -> String {
    let base = match kind {
        ShapeKind::Text(_) => "TextBox",
        ShapeKind::Picture(_) => "Picture",
        ShapeKind::AutoShape(_) => "Shape",
        ShapeKind::Table(_) => "Table",
        ShapeKind::Group(_) => "Group",
        ShapeKind::Unsupported { .. } => "Object",
    };
    format!("{} {}", base, shape_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn rect() -> Rect {
        Rect::new(0, 0, 914_400, 914_400).unwrap()
    }

    #[test]
    fn test_default_names() {
        assert_eq!(Shape::text_box(3, rect(), "x").name(), "TextBox 3");
        assert_eq!(Shape::auto_shape(4, rect(), "rect", None).name(), "Shape 4");
    }

    #[test]
    fn test_picture_requires_known_format() {
        let pic = Shape::picture(3, rect(), PNG.to_vec(), "logo").unwrap();
        match pic.kind() {
            ShapeKind::Picture(p) => assert_eq!(p.format(), ImageFormat::Png),
            other => panic!("unexpected kind {:?}", other),
        }
        assert!(Shape::picture(3, rect(), b"text".to_vec(), "bad").is_err());
    }

    #[test]
    fn test_title_detection() {
        let title = Shape::text_box(2, rect(), "Agenda").with_placeholder("ctrTitle");
        assert!(title.is_title());
        assert!(title.is_placeholder());
        assert!(!Shape::text_box(3, rect(), "body").is_title());
    }

    #[test]
    fn test_kind_tag_parsing() {
        assert_eq!("TextBox".parse::<ShapeKindTag>().unwrap(), ShapeKindTag::TextBox);
        assert_eq!("image".parse::<ShapeKindTag>().unwrap(), ShapeKindTag::Picture);
        assert!("chart".parse::<ShapeKindTag>().is_err());
    }

    #[test]
    fn test_auto_shape_text() {
        let mut shape = Shape::auto_shape(5, rect(), "ellipse", Some("FF0000".into()));
        assert_eq!(shape.text(), None);
        if let ShapeKind::AutoShape(auto) = shape.kind_mut() {
            auto.text = Some(TextBody::from_text("inside"));
        }
        assert_eq!(shape.text().as_deref(), Some("inside"));
    }
}
