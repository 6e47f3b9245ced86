//! NetCDF export of reprojected grids
//!
//! Writes the pipeline output to a new NetCDF file with 2-D `lat`/`lon`
//! variables next to every selected field, so external plotting tools can
//! contour the fields on a map without redoing the projection.

use crate::errors::Result;
use crate::pipeline::{PipelineOutput, X_AXIS, Y_AXIS};
use crate::render::Renderer;
use chrono::Utc;
use netcdf::create;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Renderer collaborator that writes the output to disk
#[derive(Debug, Clone)]
pub struct NetCdfExporter {
    output_path: PathBuf,
}

impl NetCdfExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write `output`, replacing any existing file at the output path.
    pub fn write(&self, output: &PipelineOutput) -> Result<()> {
        if self.output_path.exists() {
            fs::remove_file(&self.output_path)?;
        }

        let mut file = create(&self.output_path)?;
        let (ny, nx) = output.geo.shape();
        file.add_dimension(Y_AXIS, ny)?;
        file.add_dimension(X_AXIS, nx)?;

        {
            let mut x_var = file.add_variable::<f64>(X_AXIS, &[X_AXIS])?;
            x_var.put_attribute("units", "m")?;
            x_var.put_attribute("long_name", "projected x coordinate")?;
            x_var.put(output.grid.x.row(0), ..)?;
        }

        {
            let mut y_var = file.add_variable::<f64>(Y_AXIS, &[Y_AXIS])?;
            y_var.put_attribute("units", "m")?;
            y_var.put_attribute("long_name", "projected y coordinate")?;
            y_var.put(output.grid.y.column(0).to_owned().view(), ..)?;
        }

        {
            let mut lat_var = file.add_variable::<f64>("lat", &[Y_AXIS, X_AXIS])?;
            lat_var.put_attribute("units", "degrees_north")?;
            lat_var.put_attribute("standard_name", "latitude")?;
            lat_var.put(output.geo.lat.view(), ..)?;
        }

        {
            let mut lon_var = file.add_variable::<f64>("lon", &[Y_AXIS, X_AXIS])?;
            lon_var.put_attribute("units", "degrees_east")?;
            lon_var.put_attribute("standard_name", "longitude")?;
            lon_var.put(output.geo.lon.view(), ..)?;
        }

        for field in &output.fields {
            let mut var = file.add_variable::<f64>(&field.name, &[Y_AXIS, X_AXIS])?;
            var.put_attribute("_FillValue", f64::NAN)?;
            if let Some(units) = &field.units {
                var.put_attribute("units", units.as_str())?;
            }
            var.put_attribute("coordinates", "lat lon")?;
            var.put(field.data.view(), ..)?;
        }

        file.add_attribute(
            "history",
            format!("Created by greenland_viz on {}", Utc::now().to_rfc3339()),
        )?;

        info!(path = %self.output_path.display(), "Exported reprojected grid");
        Ok(())
    }
}

impl Renderer for NetCdfExporter {
    fn render(&mut self, output: &PipelineOutput) -> Result<()> {
        self.write(output)
    }
}
