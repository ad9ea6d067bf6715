//! _Projected Grid_ tessellates the part of an infinite plane which a perspective camera can see.
//!
//! The output is a regular `sides × sides` grid of world-space points whose density follows the
//! perspective of the view: dense close to the camera, sparse near the horizon. This is the
//! classic way to render large displaced surfaces such as open water; a height field sampler
//! displaces the emitted vertices along the plane normal afterwards and a renderer draws them.
//! Neither of those is part of this crate.
//!
//! # Usage
//!
//! ```
//! use projected_grid::prelude::*;
//!
//! let camera = Perspective::new(vec3(0.0, 2.0, 6.0), std::f32::consts::PI, 0.0);
//! let mut grid = ProjectedGrid::new(Plane::XZ, ProjectedGridOptions::new(64, 0.2, 0.0)).unwrap();
//!
//! // Once per frame
//! if grid.compute_visible_range(&camera) {
//!     let vertices = grid.build_vertices().unwrap();
//!     assert_eq!(vertices.len(), 64 * 64);
//! }
//! ```
//!
//! ## Concepts
//!
//! - [`camera::Perspective`]: a yaw/pitch camera, used both for rendering and as the projector
//! - [`grid::ProjectedGrid`]: the base plane, its displacement envelope and the range matrix
//! - [`math::Plane`]: planes in implicit `a·x + b·y + c·z + d = 0` form
//!
//! **_NOTE:_** Clip space follows the OpenGL convention: normalized device depth runs from
//! [`math::NDC_NEAR`] (−1) to [`math::NDC_FAR`] (+1).

#[macro_use]
extern crate log;

pub mod camera;
pub mod config;
pub mod error;
pub mod grid;
pub mod math;

/// Things which are used in almost every single _Projected Grid_ program.
pub mod prelude {
    pub use super::{
        camera::{Camera, CameraParams, Perspective},
        config::Config,
        error::Error,
        grid::{ProjectedGrid, ProjectedGridOptions},
        math::{vec2, vec3, Line, Mat4, Plane, Rect, Vec2, Vec3},
    };
}
