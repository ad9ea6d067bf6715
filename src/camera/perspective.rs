use {
    super::{Camera, CameraParams},
    crate::{
        error::Error,
        math::{uvec2, vec2, vec3, Mat4, UVec2, Vec2, Vec3},
    },
    std::{
        f32::consts::{FRAC_PI_2, PI},
        fs::{read_to_string, write},
        path::Path,
    },
};

/// A first-person perspective camera: a position plus yaw/pitch angles, without roll.
///
/// Every mutator rebuilds the matrices it affects before returning, so readers never observe a
/// stale view or projection. Copying a camera produces a fully independent camera.
#[derive(Clone, Debug)]
pub struct Perspective {
    far: f32,
    fov: f32, // Vertical field of view, in degrees
    near: f32,
    position: Vec3,
    proj: Mat4,
    proj_inv: Mat4,
    right: Vec3,
    rotation: Vec2, // x is yaw (horizontal), y is pitch (vertical); both in radians
    target: Vec3,
    up: Vec3,
    view: Mat4,
    view_inv: Mat4,
    viewport: UVec2,
}

impl Perspective {
    /// Creates a new camera at `position` using the given yaw and pitch, in radians.
    ///
    /// A yaw of zero looks down +z; a yaw of π looks down −z.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut res = Self {
            far: 100.0,
            fov: 45.0,
            near: 0.01,
            position,
            proj: Mat4::IDENTITY,
            proj_inv: Mat4::IDENTITY,
            right: Vec3::ZERO,
            rotation: vec2(yaw, pitch),
            target: Vec3::ZERO,
            up: Vec3::ZERO,
            view: Mat4::IDENTITY,
            view_inv: Mat4::IDENTITY,
            viewport: uvec2(1280, 720),
        };
        res.update_proj();
        res.update_view();
        res
    }

    /// Returns the width of the view of this camera divided by the height.
    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.x as f32 / self.viewport.y as f32
    }

    /// Returns the maximum distance this camera can see.
    pub const fn far_clip(&self) -> f32 {
        self.far
    }

    /// Returns the vertical field of view, in degrees.
    pub const fn fov(&self) -> f32 {
        self.fov
    }

    /// Returns the minimum distance this camera can see.
    pub const fn near_clip(&self) -> f32 {
        self.near
    }

    pub const fn params(&self) -> CameraParams {
        CameraParams {
            position: self.position,
            rotation: self.rotation,
        }
    }

    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns the unit length vector pointing to the right of the view.
    pub const fn right(&self) -> Vec3 {
        self.right
    }

    /// Returns `(yaw, pitch)` in radians.
    pub const fn rotation(&self) -> Vec2 {
        self.rotation
    }

    /// Returns the unit length vector pointing upwards in the view.
    pub const fn up(&self) -> Vec3 {
        self.up
    }

    pub const fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Adds to the current yaw and pitch, in radians.
    pub fn add_rotation(&mut self, yaw: f32, pitch: f32) {
        self.rotation += vec2(yaw, pitch);
        self.update_view();
    }

    /// Moves along the right vector; negative values move left.
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right * distance;
        self.update_view();
    }

    /// Moves along the direction of view; negative values move backwards.
    pub fn move_target(&mut self, distance: f32) {
        self.position += self.target * distance;
        self.update_view();
    }

    /// Moves along the up vector; negative values move down.
    pub fn move_up(&mut self, distance: f32) {
        self.position += self.up * distance;
        self.update_view();
    }

    /// Points this camera along `direction`, solving for yaw and pitch.
    ///
    /// `direction` must have a non-zero length; this is not checked and a zero vector produces
    /// `NaN` matrices.
    pub fn set_direction(&mut self, direction: Vec3) {
        let dir = direction.normalize();
        self.rotation = vec2(dir.x.atan2(dir.z), dir.y.clamp(-1.0, 1.0).asin());
        self.update_view();
    }

    pub fn set_far_clip(&mut self, far: f32) {
        self.far = far;
        self.update_proj();
    }

    /// Sets the vertical field of view, in degrees.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.update_proj();
    }

    pub fn set_near_clip(&mut self, near: f32) {
        self.near = near;
        self.update_proj();
    }

    /// Applies a previously saved position and rotation.
    pub fn set_params(&mut self, params: CameraParams) {
        self.position = params.position;
        self.rotation = params.rotation;
        self.update_view();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view();
    }

    /// Sets the yaw and pitch, in radians.
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.rotation = vec2(yaw, pitch);
        self.update_view();
    }

    /// Sets the output dimensions, which define the aspect ratio of the projection.
    pub fn set_viewport(&mut self, viewport: UVec2) {
        self.viewport = viewport;
        self.update_proj();
    }

    /// Reads a position and rotation record written by [`Perspective::save_params`].
    ///
    /// On failure the camera is left untouched.
    pub fn load_params(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let params = read_to_string(path)
            .map_err(Error::from)
            .and_then(|record| record.parse::<CameraParams>());

        match params {
            Ok(params) => {
                self.set_params(params);
                info!("Loaded camera settings from {}", path.display());

                Ok(())
            }
            Err(err) => {
                warn!("Cannot read camera settings from {}: {}", path.display(), err);

                Err(err)
            }
        }
    }

    /// Writes the position and rotation of this camera as a two-line text record.
    pub fn save_params(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();

        write(path, self.params().to_string()).map_err(|err| {
            warn!("Cannot save camera settings to {}: {}", path.display(), err);

            Error::from(err)
        })?;

        info!("Saved camera settings to {}", path.display());

        Ok(())
    }

    fn update_proj(&mut self) {
        debug_assert!(self.fov.is_finite());
        debug_assert!(self.near.is_finite());
        debug_assert!(self.far.is_finite());

        self.proj = Mat4::perspective_rh_gl(
            self.fov.to_radians(),
            self.aspect_ratio(),
            self.near,
            self.far,
        );
        self.proj_inv = self.proj.inverse();
    }

    fn update_view(&mut self) {
        debug_assert!(self.position.is_finite());

        let (yaw, pitch) = (self.rotation.x, self.rotation.y);

        // Update the reference vectors; right never leaves the horizontal plane so there is no roll
        self.target = vec3(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos());
        self.right = vec3((yaw - FRAC_PI_2).sin(), 0.0, (yaw - FRAC_PI_2).cos());
        self.up = self.right.cross(self.target);

        // Update the view matrices
        self.view = Mat4::look_at_rh(self.position, self.position + self.target, self.up);
        self.view_inv = self.view.inverse();
    }
}

impl Camera for Perspective {
    fn eye(&self) -> Vec3 {
        self.position
    }

    fn direction(&self) -> Vec3 {
        self.target
    }

    fn projection(&self) -> Mat4 {
        self.proj
    }

    fn projection_inv(&self) -> Mat4 {
        self.proj_inv
    }

    fn view(&self) -> Mat4 {
        self.view
    }

    fn view_inv(&self) -> Mat4 {
        self.view_inv
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self::new(Vec3::ZERO, PI, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::math::vec3,
        rand::{rngs::StdRng, Rng, SeedableRng},
        std::{env::temp_dir, f32::consts::TAU},
    };

    fn random_camera(rng: &mut StdRng) -> Perspective {
        let mut camera = Perspective::new(
            vec3(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            ),
            rng.gen_range(0.0..TAU),
            rng.gen_range(-1.5..1.5),
        );
        camera.set_fov(rng.gen_range(30.0..90.0));
        camera.set_near_clip(rng.gen_range(0.1..1.0));
        camera.set_far_clip(rng.gen_range(10.0..100.0));
        camera.set_viewport(uvec2(rng.gen_range(320..1920), rng.gen_range(240..1080)));
        camera
    }

    #[test]
    fn canonical_forward() {
        let camera = Perspective::new(Vec3::ZERO, 0.0, 0.0);

        assert!(camera.direction().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(camera.right().abs_diff_eq(-Vec3::X, 1e-6));
        assert!(camera.up().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn default_looks_down_negative_z() {
        let camera = Perspective::default();

        assert!(camera.direction().abs_diff_eq(-Vec3::Z, 1e-6));
        assert!(camera.up().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn basis_is_orthonormal() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..256 {
            let camera = Perspective::new(
                Vec3::ZERO,
                rng.gen_range(0.0..TAU),
                rng.gen_range(0.0..TAU),
            );
            let (dir, right, up) = (camera.direction(), camera.right(), camera.up());

            assert!((dir.length() - 1.0).abs() < 1e-5);
            assert!((right.length() - 1.0).abs() < 1e-5);
            assert!((up.length() - 1.0).abs() < 1e-5);
            assert!(dir.dot(right).abs() < 1e-5);
            assert!(dir.dot(up).abs() < 1e-5);
            assert!(right.dot(up).abs() < 1e-5);
        }
    }

    #[test]
    fn view_projection_composition() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..64 {
            let camera = random_camera(&mut rng);
            let view_proj = camera.projection() * camera.view();
            let view_proj_inv = camera.view_inv() * camera.projection_inv();

            assert!(camera.view_projection().abs_diff_eq(view_proj, 1e-5));
            assert!(camera.view_projection_inv().abs_diff_eq(view_proj_inv, 1e-5));

            // The composed inverse really is an inverse
            assert!((camera.view_projection() * camera.view_projection_inv())
                .abs_diff_eq(Mat4::IDENTITY, 1e-2));
        }
    }

    #[test]
    fn unproject_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..64 {
            let camera = random_camera(&mut rng);

            for x in [-1.0, 1.0] {
                for y in [-1.0, 1.0] {
                    for z in [-1.0, 1.0] {
                        let ndc = vec3(x, y, z);
                        let world = camera.unproject_point(ndc);

                        assert!(camera.project_point(world).abs_diff_eq(ndc, 1e-2));
                    }
                }
            }
        }
    }

    #[test]
    fn set_direction_round_trip() {
        let mut camera = Perspective::default();

        for dir in [
            vec3(0.0, 0.0, -1.0),
            vec3(1.0, 0.0, 0.0),
            vec3(0.3, -0.8, 0.2),
            vec3(-2.0, 1.0, -5.0),
            vec3(0.0, -1.0, 0.0),
        ] {
            camera.set_direction(dir);

            assert!(camera.direction().abs_diff_eq(dir.normalize(), 1e-5));
        }
    }

    #[test]
    fn moves_along_basis() {
        let mut camera = Perspective::default();
        camera.move_target(2.0);
        camera.move_right(3.0);
        camera.move_up(-1.0);

        assert!(camera.position().abs_diff_eq(vec3(3.0, -1.0, -2.0), 1e-5));
        assert!(camera
            .view_inv()
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(camera.position(), 1e-4));
    }

    #[test]
    fn add_rotation_accumulates() {
        let mut camera = Perspective::new(Vec3::ZERO, 1.0, 0.25);
        camera.add_rotation(0.5, -0.5);

        assert!(camera.rotation().abs_diff_eq(vec2(1.5, -0.25), 1e-6));
    }

    #[test]
    fn projection_tracks_setters() {
        let mut camera = Perspective::default();
        let before = camera.projection();
        camera.set_viewport(uvec2(100, 100));

        assert_eq!(camera.aspect_ratio(), 1.0);
        assert_ne!(camera.projection(), before);
        assert!((camera.projection() * camera.projection_inv()).abs_diff_eq(Mat4::IDENTITY, 1e-3));
    }

    #[test]
    fn copies_are_independent() {
        let camera = Perspective::default();
        let mut copy = camera.clone();
        copy.set_position(vec3(1.0, 2.0, 3.0));

        assert_eq!(camera.position(), Vec3::ZERO);
        assert_ne!(camera.view(), copy.view());
    }

    #[test]
    fn save_and_load_params() {
        let path = temp_dir().join("projected-grid-camera-save-load.cfg");
        let camera = Perspective::new(vec3(1.5, -2.0, 30.25), 0.75, -0.125);
        camera.save_params(&path).unwrap();

        let mut loaded = Perspective::default();
        loaded.load_params(&path).unwrap();

        assert!(loaded.position().abs_diff_eq(camera.position(), 1e-4));
        assert!(loaded.rotation().abs_diff_eq(camera.rotation(), 1e-4));
        assert!(loaded.view().abs_diff_eq(camera.view(), 1e-3));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn failed_load_leaves_camera_untouched() {
        let path = temp_dir().join("projected-grid-camera-garbage.cfg");
        std::fs::write(&path, "1.0 2.0 nope\n").unwrap();

        let mut camera = Perspective::new(vec3(4.0, 5.0, 6.0), 0.1, 0.2);
        let view = camera.view();

        assert!(camera.load_params(&path).is_err());
        assert!(camera
            .load_params(temp_dir().join("projected-grid-camera-missing.cfg"))
            .is_err());
        assert_eq!(camera.position(), vec3(4.0, 5.0, 6.0));
        assert_eq!(camera.view(), view);

        let _ = std::fs::remove_file(path);
    }
}
