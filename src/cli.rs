//! Defines command-line interface options using `clap` for greenland-viz.

use clap::Parser;
use std::path::PathBuf;

/// Reproject a Greenland ice-sheet grid to longitude/latitude
#[derive(Parser, Debug)]
#[command(
    name = "greenland-viz",
    version,
    about = "Loads a polar-stereographic NetCDF ice-sheet grid and reprojects it for mapping"
)]
pub struct Args {
    /// Dataset filename, resolved against the data directory. Defaults to Greenland1km.nc
    pub dataset: Option<PathBuf>,
}
