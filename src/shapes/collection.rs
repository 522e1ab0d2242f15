/// Ordered shape collection of one slide.
use super::geometry::Rect;
use super::shape::Shape;
use crate::common::{Error, Result};

/// The shapes of a slide, in z-order.
///
/// Shapes are addressed by their 0-based position. Positions shift when a
/// shape is removed; shape ids never do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeSet {
    shapes: Vec<Shape>,
}

impl ShapeSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    /// Shape at `index`, or an index error naming `shape_index`.
    pub fn shape(&self, index: usize) -> Result<&Shape> {
        Error::check_index("shape_index", index, self.len())?;
        Ok(&self.shapes[index])
    }

    pub fn shape_mut(&mut self, index: usize) -> Result<&mut Shape> {
        Error::check_index("shape_index", index, self.len())?;
        Ok(&mut self.shapes[index])
    }

    /// Geometry of the shape at `index`.
    pub fn geometry(&self, index: usize) -> Result<Rect> {
        self.shape(index).map(Shape::geometry)
    }

    /// Replace the geometry of the shape at `index`.
    pub fn set_geometry(&mut self, index: usize, rect: Rect) -> Result<()> {
        self.shape_mut(index)?.set_geometry(rect);
        Ok(())
    }

    /// Append a shape, returning its index.
    pub fn push(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<Shape> {
        Error::check_index("shape_index", index, self.len())?;
        Ok(self.shapes.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    /// Geometries of all shapes, in order.
    pub fn geometries(&self) -> Vec<Rect> {
        self.shapes.iter().map(Shape::geometry).collect()
    }

    /// Next free shape id.
    ///
    /// Id 1 belongs to the slide's shape tree, so ids start at 2. Ids of
    /// group children count as taken.
    pub fn next_shape_id(&self) -> u32 {
        fn max_id(shapes: &[Shape]) -> u32 {
            shapes
                .iter()
                .map(|s| match s.kind() {
                    super::ShapeKind::Group(children) => s.shape_id().max(max_id(children)),
                    _ => s.shape_id(),
                })
                .max()
                .unwrap_or(1)
        }
        max_id(&self.shapes).max(1) + 1
    }
}

impl FromIterator<Shape> for ShapeSet {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ShapeSet {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: i64) -> Rect {
        Rect::new(left, 0, 100, 100).unwrap()
    }

    #[test]
    fn test_geometry_access() {
        let mut set: ShapeSet = (2..5).map(|id| Shape::text_box(id, rect(id as i64), "")).collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.geometry(1).unwrap().left(), 3);

        set.set_geometry(1, rect(500)).unwrap();
        assert_eq!(set.geometry(1).unwrap().left(), 500);

        let err = set.geometry(3).unwrap_err();
        assert_eq!(err.to_string(), "Invalid shape_index: 3. Must be 0-2");
    }

    #[test]
    fn test_next_shape_id_counts_group_children() {
        let mut set = ShapeSet::new();
        assert_eq!(set.next_shape_id(), 2);

        set.push(Shape::text_box(4, rect(0), "a"));
        set.push(Shape::group(5, rect(0), vec![Shape::text_box(9, rect(0), "b")]));
        assert_eq!(set.next_shape_id(), 10);
    }
}
