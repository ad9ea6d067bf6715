use super::Vec3;

/// A line through two points. Only used as a query argument; the segment between `a` and `b`
/// is parameterized as `a + t·(b − a)` for `t` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub a: Vec3,
    pub b: Vec3,
}

impl Line {
    pub const fn new(a: Vec3, b: Vec3) -> Self {
        Self { a, b }
    }

    /// Returns `b − a`; not normalized.
    pub fn direction(&self) -> Vec3 {
        self.b - self.a
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.a + self.direction() * t
    }
}
