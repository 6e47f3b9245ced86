//! Selection of 2-D scalar fields from a dataset
//!
//! Fields such as ice thickness (`thk`) or basal heat flux (`bheatflx`) are
//! stored either as `(y, x)` or with a leading time/band dimension
//! `(time, y, x)`. Selection fixes that leading index.

use crate::dataset::{string_attribute, Dataset, MaskAndScale};
use crate::errors::{GreenlandVizError, Result};
use ndarray::Array2;
use tracing::debug;

/// A physical quantity sampled at every cell of a `(ny, nx)` grid
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub name: String,
    pub units: Option<String>,
    /// Unpacked values; masked cells are NaN
    pub data: Array2<f64>,
}

impl ScalarField {
    /// `(ny, nx)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Min, mean and max over finite cells, or `None` if every cell is NaN
    pub fn summary(&self) -> Option<FieldSummary> {
        let mut count = 0usize;
        let mut sum = 0.0_f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for &v in self.data.iter().filter(|v| v.is_finite()) {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        (count > 0).then(|| FieldSummary {
            min,
            mean: sum / count as f64,
            max,
            valid: count,
            total: self.data.len(),
        })
    }
}

/// Quick statistics of a [`ScalarField`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    /// Number of finite cells
    pub valid: usize,
    pub total: usize,
}

/// Extract the `(ny, nx)` slice of `name` at `leading_index`.
///
/// Rank-3 variables are sliced along their first dimension. A rank-2
/// variable is a single implicit slice, so only index 0 is accepted.
///
/// # Errors
///
/// `VariableMissing` if the variable is absent, `IndexOutOfRange` if the
/// index is past the first dimension, `ShapeMismatch` for any other rank.
pub fn select_field(dataset: &Dataset, name: &str, leading_index: usize) -> Result<ScalarField> {
    let var = dataset.variable(name)?;
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

    let (ny, nx, values) = match shape.as_slice() {
        &[ny, nx] => {
            if leading_index > 0 {
                return Err(GreenlandVizError::IndexOutOfRange {
                    var: name.to_string(),
                    index: leading_index,
                    len: 1,
                });
            }
            (ny, nx, var.get_values::<f64, _>(..)?)
        }
        &[len, ny, nx] => {
            if leading_index >= len {
                return Err(GreenlandVizError::IndexOutOfRange {
                    var: name.to_string(),
                    index: leading_index,
                    len,
                });
            }
            let values =
                var.get_values::<f64, _>((leading_index..leading_index + 1, 0..ny, 0..nx))?;
            (ny, nx, values)
        }
        other => {
            return Err(GreenlandVizError::shape(format!(
                "field '{}' must be 2-D or 3-D, found shape {:?}",
                name, other
            )))
        }
    };

    let mut data = Array2::from_shape_vec((ny, nx), values)?;
    MaskAndScale::from_variable(&var).apply(data.iter_mut());

    debug!(field = name, index = leading_index, ny, nx, "Selected field");
    Ok(ScalarField {
        name: name.to_string(),
        units: string_attribute(&var, "units"),
        data,
    })
}

/// Select several fields at the same leading index, in the order given.
pub fn select_fields(
    dataset: &Dataset,
    names: &[String],
    leading_index: usize,
) -> Result<Vec<ScalarField>> {
    names
        .iter()
        .map(|name| select_field(dataset, name, leading_index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn summary_ignores_nan() {
        let field = ScalarField {
            name: "thk".to_string(),
            units: None,
            data: array![[1.0, f64::NAN], [3.0, 5.0]],
        };
        let s = field.summary().unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_eq!(s.mean, 3.0);
        assert_eq!(s.valid, 3);
        assert_eq!(s.total, 4);
    }

    #[test]
    fn summary_of_all_nan_is_none() {
        let field = ScalarField {
            name: "thk".to_string(),
            units: None,
            data: array![[f64::NAN]],
        };
        assert!(field.summary().is_none());
    }
}
