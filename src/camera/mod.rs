mod params;
mod perspective;

pub use self::{params::CameraParams, perspective::Perspective};

use crate::math::{vec3, Mat4, Vec3, NDC_FAR, NDC_NEAR};

/// Read-only view of a camera: where it is, where it looks and how it projects.
pub trait Camera {
    /// Returns the position this camera is looking from.
    fn eye(&self) -> Vec3;

    /// Returns the unit length direction this camera is looking towards.
    fn direction(&self) -> Vec3;

    /// World space to camera space.
    fn view(&self) -> Mat4;

    /// Camera space to world space.
    fn view_inv(&self) -> Mat4;

    /// Camera space to clip space.
    fn projection(&self) -> Mat4;

    /// Clip space to camera space.
    fn projection_inv(&self) -> Mat4;

    /// World space to clip space: `projection · view`.
    fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Clip space to world space: `view⁻¹ · projection⁻¹`.
    fn view_projection_inv(&self) -> Mat4 {
        self.view_inv() * self.projection_inv()
    }

    /// Transforms a world space point into normalized device coordinates.
    fn project_point(&self, p: Vec3) -> Vec3 {
        self.view_projection().project_point3(p)
    }

    /// Transforms a normalized device coordinate into world space.
    fn unproject_point(&self, p: Vec3) -> Vec3 {
        self.view_projection_inv().project_point3(p)
    }

    /// Gets the world-space corner positions of the viewing frustum.
    ///
    /// The four near corners come first, then the four far corners; within each group the order
    /// is `(-x, -y)`, `(+x, -y)`, `(-x, +y)`, `(+x, +y)`.
    fn corners(&self) -> [Vec3; 8] {
        let view_proj_inv = self.view_projection_inv();

        // Unproject the NDC double-cube coordinates
        const P: f32 = 1.0;
        const N: f32 = -1.0;
        [
            view_proj_inv.project_point3(vec3(N, N, NDC_NEAR)),
            view_proj_inv.project_point3(vec3(P, N, NDC_NEAR)),
            view_proj_inv.project_point3(vec3(N, P, NDC_NEAR)),
            view_proj_inv.project_point3(vec3(P, P, NDC_NEAR)),
            view_proj_inv.project_point3(vec3(N, N, NDC_FAR)),
            view_proj_inv.project_point3(vec3(P, N, NDC_FAR)),
            view_proj_inv.project_point3(vec3(N, P, NDC_FAR)),
            view_proj_inv.project_point3(vec3(P, P, NDC_FAR)),
        ]
    }
}
