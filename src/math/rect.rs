use {
    super::{vec4, Mat4, Vec2},
    serde::{Deserialize, Serialize},
};

/// An axis-aligned rectangle in a two-dimensional projective space, stored as a position (the
/// minimum corner) and dimensions.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Rect {
    pub dims: Vec2,
    pub pos: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            dims: Vec2::new(width, height),
            pos: Vec2::new(x, y),
        }
    }

    /// Returns the smallest rectangle containing every given point, or `None` if there are none.
    pub fn bounding<I: IntoIterator<Item = Vec2>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));

        Some(Self {
            dims: max - min,
            pos: min,
        })
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.dims
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    /// Returns `true` if both position and dimensions are neither infinite nor `NaN`.
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.dims.is_finite()
    }

    /// Returns the matrix which maps the `[0, 1]` range of the x and y coordinates onto this
    /// rectangle, leaving z and w untouched:
    ///
    /// ```text
    /// [ width  0       0  x ]
    /// [ 0      height  0  y ]
    /// [ 0      0       1  0 ]
    /// [ 0      0       0  1 ]
    /// ```
    pub fn unit_to_rect(&self) -> Mat4 {
        Mat4::from_cols(
            vec4(self.dims.x, 0.0, 0.0, 0.0),
            vec4(0.0, self.dims.y, 0.0, 0.0),
            vec4(0.0, 0.0, 1.0, 0.0),
            vec4(self.pos.x, self.pos.y, 0.0, 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::math::vec2};

    #[test]
    fn bounding_points() {
        let rect = Rect::bounding([vec2(1.0, -2.0), vec2(-3.0, 4.0), vec2(0.5, 0.5)]).unwrap();

        assert_eq!(rect.min(), vec2(-3.0, -2.0));
        assert_eq!(rect.max(), vec2(1.0, 4.0));
        assert_eq!(rect.dims, vec2(4.0, 6.0));
    }

    #[test]
    fn bounding_nothing() {
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }

    #[test]
    fn unit_square_maps_to_rect() {
        let rect = Rect::new(-0.5, 0.25, 2.0, 0.5);
        let m = rect.unit_to_rect();

        assert_eq!(m.transform_point3(crate::math::vec3(0.0, 0.0, 0.7)).truncate(), rect.min());
        assert_eq!(m.transform_point3(crate::math::vec3(1.0, 1.0, -1.0)).truncate(), rect.max());
        assert_eq!(m.transform_point3(crate::math::vec3(1.0, 1.0, -1.0)).z, -1.0);
    }
}
