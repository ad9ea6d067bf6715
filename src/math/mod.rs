mod line;
mod plane;
mod rect;

pub use {
    self::{
        line::Line,
        plane::{Plane, PARALLEL_EPSILON},
        rect::Rect,
    },
    glam::{mat4, uvec2, vec2, vec3, vec4, Mat4, UVec2, Vec2, Vec3, Vec4},
};

/// Normalized device depth of the near clipping plane, matching `Mat4::perspective_rh_gl`.
pub const NDC_NEAR: f32 = -1.0;

/// Normalized device depth of the far clipping plane, matching `Mat4::perspective_rh_gl`.
pub const NDC_FAR: f32 = 1.0;
