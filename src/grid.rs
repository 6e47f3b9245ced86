//! Expansion of 1-D axes into 2-D coordinate grids
//!
//! Grids use "ij" indexing: rows follow the y axis, columns follow the x
//! axis, so both arrays have shape `(ny, nx)`.

use crate::errors::{GreenlandVizError, Result};
use ndarray::{Array2, ArrayView1, Zip};

/// Projected coordinates of every grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    /// `x[[i, j]]` is the x-axis value of column `j`
    pub x: Array2<f64>,
    /// `y[[i, j]]` is the y-axis value of row `i`
    pub y: Array2<f64>,
}

impl CoordinateGrid {
    /// `(ny, nx)`
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Row-major `(x, y)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Geographic coordinates of every grid cell, in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct GeoGrid {
    pub lon: Array2<f64>,
    pub lat: Array2<f64>,
}

/// Extent of the finite cells of a [`GeoGrid`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl GeoGrid {
    /// `(ny, nx)`
    pub fn shape(&self) -> (usize, usize) {
        self.lon.dim()
    }

    /// Bounding box over cells whose lon and lat are both finite
    pub fn bounds(&self) -> Option<GeoBounds> {
        let mut bounds: Option<GeoBounds> = None;
        for (&lon, &lat) in self.lon.iter().zip(self.lat.iter()) {
            if !(lon.is_finite() && lat.is_finite()) {
                continue;
            }
            let b = bounds.get_or_insert(GeoBounds {
                min_lon: lon,
                max_lon: lon,
                min_lat: lat,
                max_lat: lat,
            });
            b.min_lon = b.min_lon.min(lon);
            b.max_lon = b.max_lon.max(lon);
            b.min_lat = b.min_lat.min(lat);
            b.max_lat = b.max_lat.max(lat);
        }
        bounds
    }
}

/// Broadcast `x` (length nx) across rows and `y` (length ny) across columns.
///
/// # Errors
///
/// `ShapeMismatch` if either axis is empty or not strictly monotonic.
pub fn meshgrid_ij(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<CoordinateGrid> {
    check_axis("x", x)?;
    check_axis("y", y)?;

    let shape = (y.len(), x.len());
    let mut grid_x = Array2::<f64>::zeros(shape);
    let mut grid_y = Array2::<f64>::zeros(shape);

    Zip::from(grid_x.rows_mut()).for_each(|mut row| row.assign(&x));
    Zip::from(grid_y.columns_mut()).for_each(|mut col| col.assign(&y));

    Ok(CoordinateGrid {
        x: grid_x,
        y: grid_y,
    })
}

fn check_axis(name: &str, axis: ArrayView1<'_, f64>) -> Result<()> {
    if axis.is_empty() {
        return Err(GreenlandVizError::shape(format!("axis '{}' is empty", name)));
    }

    let increasing = axis.windows(2).into_iter().all(|w| w[0] < w[1]);
    let decreasing = axis.windows(2).into_iter().all(|w| w[0] > w[1]);
    if !(increasing || decreasing) {
        return Err(GreenlandVizError::shape(format!(
            "axis '{}' is not strictly monotonic",
            name
        )));
    }
    Ok(())
}
