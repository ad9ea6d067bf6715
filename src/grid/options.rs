use {
    crate::error::Error,
    serde::{Deserialize, Serialize},
};

/// Tessellation and displacement settings of a [`ProjectedGrid`](super::ProjectedGrid).
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProjectedGridOptions {
    /// Height the projector keeps above the base plane, on top of `strength`.
    pub elevation: f32,
    /// Number of vertices along each side of the grid; at least two.
    pub sides: usize,
    /// Smooth the height field after sampling. Not used by the grid itself; carried for the
    /// height field sampler which displaces the emitted vertices.
    pub smooth: bool,
    /// Maximum vertical displacement applied by the height field.
    pub strength: f32,
}

impl ProjectedGridOptions {
    pub const fn new(sides: usize, strength: f32, elevation: f32) -> Self {
        Self {
            elevation,
            sides,
            smooth: false,
            strength,
        }
    }

    /// Minimum height of the projector above the base plane: `strength + elevation`.
    pub fn height_bound(&self) -> f32 {
        self.strength + self.elevation
    }

    /// Returns `Ok` if these options describe a grid which can be evaluated.
    pub fn validate(&self) -> Result<(), Error> {
        if self.sides < 2 {
            return Err(Error::InvalidSides(self.sides));
        }

        Ok(())
    }

    /// Total number of vertices in the grid: `sides²`.
    pub const fn vertex_count(&self) -> usize {
        self.sides * self.sides
    }

    pub const fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }
}

impl Default for ProjectedGridOptions {
    fn default() -> Self {
        Self::new(256, 35.0, 50.0)
    }
}
