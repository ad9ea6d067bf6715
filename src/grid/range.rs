use {
    super::ProjectedGrid,
    crate::{
        camera::{Camera, Perspective},
        math::{Line, Rect, Vec3, PARALLEL_EPSILON},
    },
};

/// Pairs of indices into [`Camera::corners`]: the near face, the sides, then the far face.
const FRUSTUM_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    (0, 4),
    (1, 5),
    (3, 7),
    (2, 6),
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
];

/// How far along the view direction the grazing-angle aim point is taken.
const GRAZING_AIM_DISTANCE: f32 = 10.0;

impl ProjectedGrid {
    /// Computes the projector camera and range matrix for this frame.
    ///
    /// Returns `false` when the frustum of `camera` does not reach the volume between the bound
    /// planes (or the projector cannot be aimed); in that case nothing is modified and the grid
    /// should not be drawn this frame.
    pub fn compute_visible_range(&mut self, camera: &Perspective) -> bool {
        let mut points = self.visible_points(camera);
        if points.is_empty() {
            debug!("Frustum does not reach the displaceable volume");

            return false;
        }

        for point in &mut points {
            *point = self.base.flatten(*point);
        }

        let projector = match self.aim_projector(camera) {
            Some(projector) => projector,
            None => {
                debug!("Projector aim is degenerate");

                return false;
            }
        };

        // Span of the visible points in projector space
        let view_proj = projector.view_projection();
        let footprint = Rect::bounding(
            points
                .iter()
                .map(|&point| view_proj.project_point3(point).truncate()),
        );
        let footprint = match footprint {
            Some(footprint) if footprint.is_finite() => footprint,
            _ => {
                debug!("Visible points do not project onto the projector");

                return false;
            }
        };

        trace!(
            "Visible range from {} points: {:?}..{:?}",
            points.len(),
            footprint.min(),
            footprint.max()
        );

        self.range = Some(projector.view_projection_inv() * footprint.unit_to_rect());
        self.footprint = Some(footprint);
        self.projector = Some(projector);

        true
    }

    /// Returns a copy of `camera` moved above the displacement envelope and aimed at the part of
    /// the base plane the camera is looking at.
    fn aim_projector(&self, camera: &Perspective) -> Option<Perspective> {
        let normal = self.base.normal();
        let eye = camera.eye();
        let dir = camera.direction();

        let height = self.base.distance(eye);
        let height_bound = self.options.height_bound();
        let mut position = eye;
        if height < height_bound {
            if height < 0.0 {
                // Reflect the position to the upper side of the plane
                position += normal * (height_bound - 2.0 * height);
            } else {
                position += normal * (height_bound - height);
            }
        }

        // Where the view ray meets the plane; unstable as the view approaches the plane
        let facing = self.base.dot_normal(dir);
        let aim_near = if facing.abs() <= PARALLEL_EPSILON {
            eye + dir
        } else {
            // Looking away from the plane while above it: mirror the view vector
            let dir = if self.base.dot_coord(eye) > 0.0 && facing > 0.0 {
                dir - normal * (2.0 * facing)
            } else {
                dir
            };

            self.base.intersect(&Line::new(eye, eye + dir))
        };

        // A point ahead of the camera, dropped onto the plane; stable at grazing angles
        let aim_far = self.base.flatten(eye + dir * GRAZING_AIM_DISTANCE);

        let fade = facing.abs().min(1.0);
        let aim = aim_near * fade + aim_far * (1.0 - fade) - position;
        if aim.length_squared() <= f32::EPSILON {
            return None;
        }

        let mut projector = camera.clone();
        projector.set_position(position);
        projector.set_direction(aim);

        Some(projector)
    }

    /// Gathers the world-space points bounding the part of the camera frustum which lies between
    /// the bound planes.
    fn visible_points(&self, camera: &impl Camera) -> Vec<Vec3> {
        let corners = camera.corners();
        let mut points = Vec::with_capacity(FRUSTUM_EDGES.len() * 2 + corners.len());

        for (src, tar) in FRUSTUM_EDGES {
            let edge = Line::new(corners[src], corners[tar]);

            for plane in [&self.upper, &self.lower] {
                if plane.crosses(&edge) {
                    points.push(plane.intersect(&edge));
                }
            }
        }

        // Corners strictly between the bound planes
        points.extend(corners.iter().copied().filter(|&corner| {
            self.upper.dot_coord(corner) / self.lower.dot_coord(corner) < 0.0
        }));

        points
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            grid::ProjectedGridOptions,
            math::{vec3, Plane},
        },
        std::f32::consts::PI,
    };

    fn grid(strength: f32, elevation: f32) -> ProjectedGrid {
        ProjectedGrid::new(Plane::XZ, ProjectedGridOptions::new(8, strength, elevation)).unwrap()
    }

    #[test]
    fn frustum_crossing_the_plane_is_visible() {
        let grid = grid(0.2, 0.0);
        let camera = Perspective::new(vec3(0.0, 2.0, 6.0), PI, 0.0);
        let points = grid.visible_points(&camera);

        // Both bound planes are the base plane, so each crossing edge is recorded twice
        assert_eq!(points.len(), 8);
        for point in points {
            assert!(point.y.abs() < 1e-3);
        }
    }

    #[test]
    fn frustum_above_the_plane_is_not_visible() {
        let grid = grid(0.2, 0.0);
        let camera = Perspective::new(vec3(0.0, 10.0, 0.0), PI, PI / 3.0);

        assert!(grid.visible_points(&camera).is_empty());
    }

    #[test]
    fn corners_between_bound_planes_are_visible() {
        let mut grid = grid(0.2, 0.0);
        grid.set_displacement(-1.0, 1.0);

        let mut camera = Perspective::new(vec3(0.0, 0.5, 0.0), PI, 0.0);
        camera.set_far_clip(1.0);
        let points = grid.visible_points(&camera);

        // The whole (short) frustum sits between the planes
        assert_eq!(points.len(), 8);
        for point in points {
            assert!(point.y > -1.0 && point.y < 1.0);
        }
    }

    #[test]
    fn projector_rises_above_envelope() {
        let grid = grid(3.0, 2.0);
        let camera = Perspective::new(vec3(1.0, 1.0, 1.0), PI, -0.3);
        let projector = grid.aim_projector(&camera).unwrap();

        assert!((projector.position().y - 5.0).abs() < 1e-5);
        assert_eq!(projector.position().x, 1.0);
        assert_eq!(projector.position().z, 1.0);
    }

    #[test]
    fn projector_stays_put_when_high_enough() {
        let grid = grid(0.2, 0.0);
        let camera = Perspective::new(vec3(0.0, 2.0, 6.0), PI, 0.0);
        let projector = grid.aim_projector(&camera).unwrap();

        assert_eq!(projector.position(), camera.position());

        // Grazing view: aim at the point ten units ahead, dropped onto the plane
        let expected = (vec3(0.0, 0.0, -4.0) - camera.position()).normalize();
        assert!(projector.direction().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn projector_reflects_below_plane() {
        let grid = grid(1.0, 0.5);
        let camera = Perspective::new(vec3(0.0, -3.0, 0.0), 0.0, 0.2);
        let projector = grid.aim_projector(&camera).unwrap();

        // height_bound - 2 * height = 1.5 + 6
        assert!((projector.position().y - 4.5).abs() < 1e-5);
        assert!(projector.direction().y < 0.0);
    }

    #[test]
    fn projector_mirrors_upward_view() {
        let grid = grid(0.0, 0.0);
        let camera = Perspective::new(vec3(0.0, 4.0, 0.0), PI, PI / 4.0);
        let projector = grid.aim_projector(&camera).unwrap();

        // The mirrored ray hits the plane in front of the camera, never behind it
        assert!(projector.direction().y < 0.0);
        assert!(projector.direction().z < 0.0);
    }

    #[test]
    fn straight_down_aims_below() {
        let grid = grid(0.5, 0.5);
        let camera = Perspective::new(vec3(2.0, 5.0, -3.0), 0.0, -PI / 2.0);
        let projector = grid.aim_projector(&camera).unwrap();

        assert!(projector.direction().abs_diff_eq(-Vec3::Y, 1e-5));
    }
}
