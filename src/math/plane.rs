use {
    super::{Line, Vec3, Vec4},
    serde::{Deserialize, Serialize},
};

/// Dot products smaller than this are treated as "parallel to the plane".
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// A flat two-dimensional surface that extends infinitely far, stored in implicit form:
/// `a·x + b·y + c·z + d = 0`.
///
/// The normal `(a, b, c)` is not required to be unit length. All of the distance functions here
/// return the *unnormalized* value of the implicit function, which is a reliable sign oracle but
/// only a Euclidean distance once [`Plane::normalize`] has been applied.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Plane {
    normal: Vec3,
    d: f32,
}

impl Plane {
    /// The `y = 0` plane with a normal pointing towards +y.
    pub const XZ: Self = Self {
        normal: Vec3::Y,
        d: 0.0,
    };

    /// Constructs a new plane from the given normal and offset.
    pub fn new(normal: Vec3, d: f32) -> Self {
        debug_assert!(d.is_finite());
        debug_assert!(normal.is_finite());

        Self { normal, d }
    }

    /// Constructs the plane which passes through `point` and is oriented along `normal`.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self::new(normal, -normal.dot(point))
    }

    /// Returns the orientation of this plane. Not necessarily unit length.
    pub const fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Returns the homogeneous `(a, b, c, d)` form of this plane.
    pub fn as_vec4(&self) -> Vec4 {
        self.normal.extend(self.d)
    }

    /// Returns the same plane with a unit length normal.
    pub fn normalize(&self) -> Self {
        let len = self.normal.length();

        debug_assert!(len > 0.0);

        Self {
            normal: self.normal / len,
            d: self.d / len,
        }
    }

    /// Returns a parallel plane moved `distance` units along the normal direction.
    pub fn offset(&self, distance: f32) -> Self {
        Self {
            normal: self.normal,
            d: self.d - distance * self.normal.length(),
        }
    }

    /// Evaluates the implicit function at `point`: `a·x + b·y + c·z + d`.
    pub fn dot_coord(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Evaluates the implicit function for a direction, ignoring the offset: `a·x + b·y + c·z`.
    pub fn dot_normal(&self, direction: Vec3) -> f32 {
        self.normal.dot(direction)
    }

    /// Signed distance of `point` from this plane, scaled by the length of the normal.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.dot_coord(point)
    }

    /// Moves `point` along the normal until it lies on this plane.
    ///
    /// Exact only for planes with a unit normal.
    pub fn flatten(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance(point)
    }

    /// Returns `true` if the endpoints of `line` lie strictly on opposite sides of this plane.
    pub fn crosses(&self, line: &Line) -> bool {
        self.dot_coord(line.a) / self.dot_coord(line.b) < 0.0
    }

    /// Returns `true` if `line` runs parallel to this plane (within [`PARALLEL_EPSILON`]).
    pub fn is_parallel(&self, line: &Line) -> bool {
        self.dot_normal(line.direction()).abs() <= PARALLEL_EPSILON
    }

    /// Returns the point where the infinite extension of `line` meets this plane.
    ///
    /// **_NOTE:_** `line` must not be parallel to this plane; there is no meaningful answer in
    /// that case and the result will not be finite. Check with [`Plane::is_parallel`] or
    /// [`Plane::crosses`] first.
    pub fn intersect(&self, line: &Line) -> Vec3 {
        debug_assert!(!self.is_parallel(line));

        let t = -self.dot_coord(line.a) / self.dot_normal(line.direction());

        line.point_at(t)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::XZ
    }
}
