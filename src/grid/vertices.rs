use {
    super::ProjectedGrid,
    crate::{
        error::Error,
        math::{vec3, vec4, Line, Mat4, Vec3, Vec4, NDC_FAR, NDC_NEAR},
    },
};

impl ProjectedGrid {
    /// Evaluates the range matrix over a `sides × sides` grid and returns the world space
    /// positions on the base plane, row by row (`v` major, `u` minor).
    ///
    /// Only the four corners are intersected with the base plane; the rest are interpolated in
    /// homogeneous coordinates, which is exact because the whole mapping is projective.
    ///
    /// The range matrix must have been computed by [`ProjectedGrid::compute_visible_range`] and
    /// should be from the current frame. On error the vertex buffer is left empty.
    pub fn build_vertices(&mut self) -> Result<&[Vec3], Error> {
        self.vertices.clear();

        if let Err(err) = self.evaluate_range() {
            self.vertices.clear();

            return Err(err);
        }

        trace!("Built {} grid vertices", self.vertices.len());

        Ok(self.vertices.as_slice())
    }

    /// Appends every grid vertex to the (empty) vertex buffer.
    fn evaluate_range(&mut self) -> Result<(), Error> {
        let range = self.range.ok_or(Error::NoVisibleRange)?;
        let plane = self.base.as_vec4();
        let corners = [
            homogeneous_corner(range, plane, 0.0, 0.0)?,
            homogeneous_corner(range, plane, 1.0, 0.0)?,
            homogeneous_corner(range, plane, 0.0, 1.0)?,
            homogeneous_corner(range, plane, 1.0, 1.0)?,
        ];

        let sides = self.options.sides;
        let last = (sides - 1) as f32;

        for iv in 0..sides {
            let v = iv as f32 / last;

            for iu in 0..sides {
                let u = iu as f32 / last;
                let p = (corners[0] * (1.0 - u) + corners[1] * u) * (1.0 - v)
                    + (corners[2] * (1.0 - u) + corners[3] * u) * v;

                let p = dehomogenize(p).ok_or(Error::Degenerate)?;

                // Height comes later, from the height field
                self.vertices.push(self.base.flatten(p));
            }
        }

        Ok(())
    }

    /// Returns the exact point where the grid ray at `(u, v)` meets the base plane, or `None` if
    /// there is no range matrix or the ray runs parallel to the plane.
    pub fn corner(&self, u: f32, v: f32) -> Option<Vec3> {
        let range = self.range?;
        let ray = Line::new(
            range.project_point3(vec3(u, v, NDC_NEAR)),
            range.project_point3(vec3(u, v, NDC_FAR)),
        );

        if self.base.is_parallel(&ray) {
            None
        } else {
            Some(self.base.intersect(&ray))
        }
    }
}

/// Returns `p.xyz / p.w`, or `None` if the point lies at (or numerically near) infinity.
fn dehomogenize(p: Vec4) -> Option<Vec3> {
    let xyz = p.truncate();

    if p.w.abs() > f32::EPSILON * xyz.abs().max_element() {
        Some(xyz / p.w)
    } else {
        None
    }
}

/// Intersects the grid ray at `(u, v)` with `plane` without leaving homogeneous coordinates.
///
/// The ray runs from `range · (u, v, near, 1)` to `range · (u, v, far, 1)`; the result is the
/// homogeneous point `o + t·d` where `plane · (o + t·d) = 0`.
fn homogeneous_corner(range: Mat4, plane: Vec4, u: f32, v: f32) -> Result<Vec4, Error> {
    let origin = range * vec4(u, v, NDC_NEAR, 1.0);
    let dir = range * vec4(u, v, NDC_FAR, 1.0) - origin;
    let denom = plane.dot(dir);

    if denom.abs() <= f32::EPSILON * plane.abs().dot(dir.abs()) {
        return Err(Error::Degenerate);
    }

    Ok(origin - dir * (plane.dot(origin) / denom))
}
