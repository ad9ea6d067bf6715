use {
    crate::{
        camera::{CameraParams, Perspective},
        error::Error,
        grid::ProjectedGridOptions,
        math::{uvec2, vec2, Vec3},
    },
    serde::{Deserialize, Serialize},
    std::{
        f32::consts::PI,
        fs::{read_to_string, write},
        path::Path,
        str::FromStr,
    },
    toml::{from_str, to_string_pretty},
};

/// Settings for one grid and the camera looking at it, read from a TOML file.
///
/// Every key is optional; accessors supply the default for anything left out.
///
/// ```toml
/// [grid]
/// sides = 128
/// strength = 0.2
/// elevation = 0.0
/// min_height = -0.2
/// max_height = 0.2
///
/// [camera]
/// position = [0.0, 2.0, 6.0]
/// rotation = [3.1415927, 0.0]
/// fov = 45.0
/// viewport = [1280, 720]
/// ```
#[derive(Debug, Default)]
pub struct Config {
    data: Data,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct Data {
    camera: Option<CameraData>,
    grid: Option<GridData>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct CameraData {
    far: Option<f32>,
    fov: Option<f32>,
    near: Option<f32>,
    position: Option<[f32; 3]>,
    rotation: Option<[f32; 2]>,
    viewport: Option<[u32; 2]>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct GridData {
    elevation: Option<f32>,
    max_height: Option<f32>,
    min_height: Option<f32>,
    sides: Option<usize>,
    smooth: Option<bool>,
    strength: Option<f32>,
}

impl Config {
    /// Reads the config file at `path`. A missing file is not an error; the defaults are used.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());

            return Ok(Self::default());
        }

        let res: Self = read_to_string(path)?.parse()?;
        debug!("Read config file {}", path.display());

        Ok(res)
    }

    /// Writes every value, including defaults, to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let camera = self.camera();
        let options = self.grid_options();
        let (min_height, max_height) = self.displacement();
        let data = Data {
            camera: Some(CameraData {
                far: Some(camera.far_clip()),
                fov: Some(camera.fov()),
                near: Some(camera.near_clip()),
                position: Some(camera.position().to_array()),
                rotation: Some(camera.rotation().to_array()),
                viewport: Some(camera.viewport().to_array()),
            }),
            grid: Some(GridData {
                elevation: Some(options.elevation),
                max_height: Some(max_height),
                min_height: Some(min_height),
                sides: Some(options.sides),
                smooth: Some(options.smooth),
                strength: Some(options.strength),
            }),
        };

        write(path.as_ref(), to_string_pretty(&data)?)?;

        Ok(())
    }

    /// Builds the rendering camera. The default looks down −z from the origin with a 45° field
    /// of view, a 0.01..100 depth range and a 1280x720 viewport.
    pub fn camera(&self) -> Perspective {
        let data = self.data.camera.as_ref();
        let params = self.camera_params();

        let mut res = Perspective::new(params.position, params.rotation.x, params.rotation.y);
        res.set_fov(data.and_then(|data| data.fov).unwrap_or(45.0));
        res.set_near_clip(data.and_then(|data| data.near).unwrap_or(0.01));
        res.set_far_clip(data.and_then(|data| data.far).unwrap_or(100.0));

        if let Some([width, height]) = data.and_then(|data| data.viewport) {
            res.set_viewport(uvec2(width.max(1), height.max(1)));
        }

        res
    }

    /// The default is the origin, looking down −z.
    pub fn camera_params(&self) -> CameraParams {
        let data = self.data.camera.as_ref();

        CameraParams {
            position: data
                .and_then(|data| data.position)
                .map(Vec3::from)
                .unwrap_or(Vec3::ZERO),
            rotation: data
                .and_then(|data| data.rotation)
                .map(|[yaw, pitch]| vec2(yaw, pitch))
                .unwrap_or_else(|| vec2(PI, 0.0)),
        }
    }

    /// Returns the `(min, max)` heights of the displacement envelope around the base plane. The
    /// default is a flat envelope, `(0, 0)`.
    pub fn displacement(&self) -> (f32, f32) {
        let data = self.data.grid.as_ref();
        let min = data.and_then(|data| data.min_height).unwrap_or_default();
        let max = data.and_then(|data| data.max_height).unwrap_or_default();

        (min.min(max), max.max(min))
    }

    /// The default is a 256x256 grid with a strength of 35 and an elevation of 50.
    pub fn grid_options(&self) -> ProjectedGridOptions {
        let defaults = ProjectedGridOptions::default();

        match &self.data.grid {
            Some(data) => ProjectedGridOptions::new(
                data.sides.unwrap_or(defaults.sides),
                data.strength.unwrap_or(defaults.strength),
                data.elevation.unwrap_or(defaults.elevation),
            )
            .with_smooth(data.smooth.unwrap_or(defaults.smooth)),
            None => defaults,
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self { data: from_str(s)? })
    }
}
