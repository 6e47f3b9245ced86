//! greenland_viz: reprojection of polar-stereographic ice-sheet grids
//!
//! Loads a gridded glaciological NetCDF dataset (ice thickness, basal heat
//! flux, ...) stored on a polar-stereographic plane, rebuilds the 2-D
//! coordinate grid from its `x`/`y` axes and reprojects every cell to
//! geographic longitude and latitude, ready for contouring on a map.
//!
//! ## Module Organization
//!
//! - [`dataset`]: read-only NetCDF access
//! - [`grid`]: axis → 2-D grid expansion and the geographic grid type
//! - [`projection`]: projection definitions and polar-stereographic transforms
//! - [`field`]: 2-D field selection at a leading time index
//! - [`pipeline`]: the end-to-end run, parameterized by field names
//! - [`render`] / [`netcdf_io`]: renderer collaborators (summary, NetCDF export)
//! - [`config`]: dataset path resolution
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use greenland_viz::prelude::*;
//!
//! let config = PipelineConfig::new("data/Greenland1km.nc").with_fields(["thk"]);
//! let output = greenland_viz::pipeline::run(&config).unwrap();
//! let thk = output.field("thk").unwrap();
//! assert_eq!(thk.shape(), output.geo.shape());
//! ```

pub mod config;
pub mod dataset;
pub mod errors;
pub mod field;
pub mod grid;
pub mod netcdf_io;
pub mod pipeline;
pub mod projection;
pub mod render;

pub use errors::{GreenlandVizError, Result};

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::dataset::Dataset;
    pub use crate::errors::{GreenlandVizError, Result};
    pub use crate::field::{select_field, ScalarField};
    pub use crate::grid::{meshgrid_ij, CoordinateGrid, GeoGrid};
    pub use crate::netcdf_io::NetCdfExporter;
    pub use crate::pipeline::{PipelineConfig, PipelineOutput};
    pub use crate::projection::{ProjectionDefinition, Transformer};
    pub use crate::render::{Renderer, SummaryRenderer};
}
