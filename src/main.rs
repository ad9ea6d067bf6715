#[macro_use]
extern crate log;

use {
    pretty_env_logger::init,
    projected_grid::prelude::*,
    std::{
        env::args,
        io::{stdout, BufWriter, Write},
    },
};

fn main() -> Result<(), Error> {
    // Enable logging
    init();

    // Optional grid/camera settings and an optional saved camera pose
    let config_arg = args().nth(1).unwrap_or_else(|| "projected-grid.toml".to_owned());
    let params_arg = args().nth(2);

    let config = Config::read(&config_arg)?;
    let mut camera = config.camera();

    if let Some(params_arg) = params_arg {
        // A bad pose file is not fatal; the configured camera is used instead
        if let Err(err) = camera.load_params(&params_arg) {
            warn!("Unable to load camera `{}`: {}", params_arg, err);
        }
    }

    debug!(
        "Camera at {:?} looking {:?}",
        camera.position(),
        camera.direction()
    );

    let (min_height, max_height) = config.displacement();
    let mut grid = ProjectedGrid::new(Plane::XZ, config.grid_options())?;
    grid.set_displacement(min_height, max_height);

    if !grid.compute_visible_range(&camera) {
        info!("The plane is not visible from this camera");

        return Ok(());
    }

    let vertices = grid.build_vertices()?;
    info!("Writing {} vertices", vertices.len());

    let mut out = BufWriter::new(stdout().lock());
    for vertex in vertices {
        writeln!(out, "{} {} {}", vertex.x, vertex.y, vertex.z)?;
    }

    out.flush()?;

    Ok(())
}
