//! Projected grid tessellation of an infinite plane.
//!
//! A regular grid in the `[0, 1]²` parameter square is mapped onto the part of the base plane
//! which the rendering camera can see. The mapping goes through an auxiliary "projector" camera
//! which is kept above the displacement envelope, so the grid always lands on the visible side of
//! the plane and the vertex density follows the perspective of the view.
//!
//! Each frame:
//!
//! 1. [`ProjectedGrid::compute_visible_range`] intersects the camera frustum with the volume
//!    between the bound planes, aims the projector, and builds the range matrix. A `false` result
//!    means nothing of the plane is visible and the frame should skip the grid.
//! 2. [`ProjectedGrid::build_vertices`] evaluates the range matrix over the grid.

mod options;
mod range;
mod vertices;

pub use self::options::ProjectedGridOptions;

use crate::{
    camera::Perspective,
    error::Error,
    math::{Mat4, Plane, Rect, Vec3},
};

pub struct ProjectedGrid {
    base: Plane,
    footprint: Option<Rect>,
    lower: Plane,
    options: ProjectedGridOptions,
    projector: Option<Perspective>,
    range: Option<Mat4>,
    upper: Plane,
    vertices: Vec<Vec3>,
}

impl ProjectedGrid {
    /// Creates a grid covering `base_plane`. Both bound planes start out equal to the base plane;
    /// see [`ProjectedGrid::set_displacement`].
    pub fn new(base_plane: Plane, options: ProjectedGridOptions) -> Result<Self, Error> {
        let base = base_plane.normalize();
        let mut res = Self {
            base,
            footprint: None,
            lower: base,
            options,
            projector: None,
            range: None,
            upper: base,
            vertices: vec![],
        };
        res.set_options(options)?;

        Ok(res)
    }

    /// Returns the plane the grid is built on, with a unit length normal.
    pub const fn base_plane(&self) -> Plane {
        self.base
    }

    /// Returns the visible part of the base plane in projector clip space, as of the last
    /// successful [`ProjectedGrid::compute_visible_range`].
    pub const fn footprint(&self) -> Option<Rect> {
        self.footprint
    }

    pub const fn lower_bound_plane(&self) -> Plane {
        self.lower
    }

    pub const fn options(&self) -> &ProjectedGridOptions {
        &self.options
    }

    /// Returns the projector camera of the last successful
    /// [`ProjectedGrid::compute_visible_range`].
    pub fn projector(&self) -> Option<&Perspective> {
        self.projector.as_ref()
    }

    /// Returns the matrix mapping the unit square (with z selecting the near or far plane) onto
    /// world space rays through the visible part of the base plane.
    pub const fn range_matrix(&self) -> Option<Mat4> {
        self.range
    }

    pub const fn upper_bound_plane(&self) -> Plane {
        self.upper
    }

    /// Returns the vertices of the last [`ProjectedGrid::build_vertices`] call.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Sets the envelope of the height field explicitly. `upper` must be above `lower` in the
    /// direction of their normals.
    pub fn set_bound_planes(&mut self, upper: Plane, lower: Plane) {
        self.upper = upper;
        self.lower = lower;
    }

    /// Sets the envelope of the height field as offsets along the base plane normal.
    pub fn set_displacement(&mut self, min_height: f32, max_height: f32) {
        debug_assert!(min_height <= max_height);

        self.upper = self.base.offset(max_height);
        self.lower = self.base.offset(min_height);
    }

    /// Replaces the grid options; rejected if `sides` is less than two.
    pub fn set_options(&mut self, options: ProjectedGridOptions) -> Result<(), Error> {
        options.validate()?;

        self.options = options;
        self.vertices.clear();
        self.vertices.reserve_exact(options.vertex_count());

        Ok(())
    }
}
