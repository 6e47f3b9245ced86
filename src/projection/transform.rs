//! Transforms between two projection definitions
//!
//! Every transform is point-wise: a grid can be flattened into a list of
//! points, transformed and reshaped, or transformed cell by cell, and both
//! give bit-identical results because each cell goes through the same
//! [`Transformer::transform_point`] call.

use super::definition::ProjectionDefinition;
use super::stereographic::PolarStereographic;
use crate::errors::{GreenlandVizError, Result};
use crate::grid::{CoordinateGrid, GeoGrid};
use ndarray::{Array2, Zip};
use rayon::prelude::*;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    /// Geographic to geographic
    Identity,
    /// Geographic to stereographic
    Forward(PolarStereographic),
    /// Stereographic to geographic
    Inverse(PolarStereographic),
    /// Stereographic to a differently parameterised stereographic plane
    Reproject(PolarStereographic, PolarStereographic),
}

/// A validated source/target projection pair
#[derive(Debug, Clone)]
pub struct Transformer {
    source: ProjectionDefinition,
    target: ProjectionDefinition,
    step: Step,
}

impl Transformer {
    /// Validate both definitions and prepare the transform.
    ///
    /// # Errors
    ///
    /// `ProjectionError` if either definition is invalid or the two use
    /// different datums (datum shifts are not supported).
    pub fn new(source: &ProjectionDefinition, target: &ProjectionDefinition) -> Result<Self> {
        source.validate()?;
        target.validate()?;

        if source.datum != target.datum {
            return Err(GreenlandVizError::projection(format!(
                "datum shift from {} to {} is not supported",
                source, target
            )));
        }

        let step = match (source.is_geographic(), target.is_geographic()) {
            (true, true) => Step::Identity,
            (true, false) => Step::Forward(PolarStereographic::from_definition(target)?),
            (false, true) => Step::Inverse(PolarStereographic::from_definition(source)?),
            (false, false) => Step::Reproject(
                PolarStereographic::from_definition(source)?,
                PolarStereographic::from_definition(target)?,
            ),
        };

        debug!(source = %source, target = %target, "Prepared coordinate transform");
        Ok(Self {
            source: source.clone(),
            target: target.clone(),
            step,
        })
    }

    /// Stereographic Greenland grid to WGS84 longitude/latitude
    pub fn greenland_to_geographic() -> Result<Self> {
        Self::new(
            &ProjectionDefinition::greenland_stereographic(),
            &ProjectionDefinition::geographic(),
        )
    }

    pub fn source(&self) -> &ProjectionDefinition {
        &self.source
    }

    pub fn target(&self) -> &ProjectionDefinition {
        &self.target
    }

    /// Transform one point. Geographic coordinates are `(lon, lat)` in degrees.
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        match &self.step {
            Step::Identity => (x, y),
            Step::Forward(proj) => proj.forward(x, y),
            Step::Inverse(proj) => proj.inverse(x, y),
            Step::Reproject(from, to) => {
                let (lon, lat) = from.inverse(x, y);
                to.forward(lon, lat)
            }
        }
    }

    /// Transform parallel lists of coordinates, preserving order.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the lists differ in length.
    pub fn transform_points(&self, xs: &[f64], ys: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        if xs.len() != ys.len() {
            return Err(GreenlandVizError::shape(format!(
                "coordinate lists differ in length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }

        Ok(xs
            .par_iter()
            .zip(ys.par_iter())
            .map(|(&x, &y)| self.transform_point(x, y))
            .unzip())
    }

    /// Flatten the grid, transform the point list, reshape to `(ny, nx)`.
    pub fn transform_grid(&self, grid: &CoordinateGrid) -> Result<GeoGrid> {
        let shape = grid.shape();
        let xs: Vec<f64> = grid.x.iter().copied().collect();
        let ys: Vec<f64> = grid.y.iter().copied().collect();

        debug!(
            points = xs.len(),
            threads = rayon::current_num_threads(),
            "Reprojecting grid"
        );
        let (lon, lat) = self.transform_points(&xs, &ys)?;

        Ok(GeoGrid {
            lon: Array2::from_shape_vec(shape, lon)?,
            lat: Array2::from_shape_vec(shape, lat)?,
        })
    }

    /// Transform each `(i, j)` cell in place order, without flattening.
    pub fn transform_grid_cellwise(&self, grid: &CoordinateGrid) -> GeoGrid {
        let shape = grid.shape();
        let mut lon = Array2::<f64>::zeros(shape);
        let mut lat = Array2::<f64>::zeros(shape);

        Zip::from(&mut lon)
            .and(&mut lat)
            .and(&grid.x)
            .and(&grid.y)
            .for_each(|lon, lat, &x, &y| {
                let (a, b) = self.transform_point(x, y);
                *lon = a;
                *lat = b;
            });

        GeoGrid { lon, lat }
    }
}
