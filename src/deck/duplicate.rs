/// Copy strategies for the shapes of a duplicated slide.
///
/// One strategy per [`ShapeKind`] tag. A strategy either returns a new shape
/// with a fresh id or an error; the caller decides whether the error aborts
/// anything (it never does for slide duplication).
use crate::common::{Error, Result};
use crate::shapes::{AutoShape, ImageFormat, Picture, Shape, ShapeKind, Table, TextBody};
use tracing::warn;

/// Allocates shape ids on the target slide.
pub(crate) struct ShapeIds {
    next: u32,
}

impl ShapeIds {
    pub(crate) fn starting_at(next: u32) -> Self {
        Self { next }
    }

    fn take(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Copy `source` into a new shape with an id from `ids`.
pub(crate) fn copy_shape(source: &Shape, ids: &mut ShapeIds) -> Result<Shape> {
    let kind = match source.kind() {
        ShapeKind::Text(body) => ShapeKind::Text(copy_text(body)),
        ShapeKind::Picture(picture) => ShapeKind::Picture(copy_picture(picture)?),
        ShapeKind::AutoShape(auto) => ShapeKind::AutoShape(copy_auto_shape(auto)),
        ShapeKind::Table(table) => ShapeKind::Table(copy_table(table)),
        ShapeKind::Group(children) => ShapeKind::Group(copy_group(children, ids)),
        ShapeKind::Unsupported { element } => {
            return Err(Error::UnsupportedShape(element.clone()));
        },
    };

    let mut copy = Shape::new(ids.take(), source.geometry(), kind).with_name(source.name());
    if let Some(placeholder) = source.placeholder() {
        copy = copy.with_placeholder(placeholder);
    }
    Ok(copy)
}

/// Fresh text body from the plain text, then the formatting of the
/// overlapping paragraph and run prefix.
fn copy_text(source: &TextBody) -> TextBody {
    let mut body = TextBody::from_text(&source.text());
    body.copy_formatting_from(source);
    body
}

fn copy_picture(source: &Picture) -> Result<Picture> {
    if ImageFormat::detect_from_bytes(source.data()).is_none() {
        return Err(Error::InvalidImage(format!(
            "picture '{}' has unrecognised image data",
            source.description()
        )));
    }
    Picture::from_bytes(source.data().to_vec(), source.description())
}

fn copy_auto_shape(source: &AutoShape) -> AutoShape {
    AutoShape {
        preset: source.preset.clone(),
        fill_color: source.fill_color.clone(),
        text: source.text.as_ref().map(copy_text),
    }
}

fn copy_table(source: &Table) -> Table {
    Table {
        rows: source.rows.clone(),
    }
}

/// Children that cannot be copied are left out of the group.
fn copy_group(children: &[Shape], ids: &mut ShapeIds) -> Vec<Shape> {
    children
        .iter()
        .filter_map(|child| match copy_shape(child, ids) {
            Ok(copy) => Some(copy),
            Err(e) => {
                warn!(shape = %child.name(), error = %e, "skipping group child");
                None
            },
        })
        .collect()
}
