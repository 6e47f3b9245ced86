//! Read-only access to gridded NetCDF datasets
//!
//! A [`Dataset`] owns the open NetCDF handle. The handle is closed when the
//! `Dataset` is dropped, so every exit path (including `?` early returns)
//! releases it.

use crate::errors::{GreenlandVizError, Result};
use ndarray::{Array1, ArrayD};
use netcdf::{AttributeValue, File, Variable};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An open, read-only gridded dataset
pub struct Dataset {
    path: PathBuf,
    file: File,
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset").field("path", &self.path).finish()
    }
}

impl Dataset {
    /// Open a dataset for reading.
    ///
    /// # Errors
    ///
    /// `DatasetNotFound` if the path does not exist, `DatasetFormatError` if
    /// the NetCDF library cannot parse it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GreenlandVizError::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = netcdf::open(path).map_err(|e| GreenlandVizError::DatasetFormatError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), "Opened dataset");
        let dataset = Self {
            path: path.to_path_buf(),
            file,
        };
        dataset.describe();
        Ok(dataset)
    }

    /// Open `path`, read every variable in `keys` into memory and close the file.
    ///
    /// # Errors
    ///
    /// Any error from [`Dataset::open`], or `VariableMissing` for the first
    /// absent key.
    pub fn load(path: impl AsRef<Path>, keys: &[&str]) -> Result<HashMap<String, ArrayD<f64>>> {
        let dataset = Self::open(path)?;
        let mut arrays = HashMap::with_capacity(keys.len());
        for &key in keys {
            arrays.insert(key.to_string(), dataset.array(key)?);
        }
        Ok(arrays)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all variables, sorted alphabetically
    pub fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.file.variables().map(|v| v.name()).collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.file.variable(name).is_some()
    }

    pub(crate) fn variable(&self, name: &str) -> Result<Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| GreenlandVizError::VariableMissing {
                var: name.to_string(),
            })
    }

    /// Dimension lengths of a variable, outermost first
    pub fn shape(&self, name: &str) -> Result<Vec<usize>> {
        let var = self.variable(name)?;
        Ok(var.dimensions().iter().map(|d| d.len()).collect())
    }

    /// Dimension names of a variable, outermost first
    pub fn dimension_names(&self, name: &str) -> Result<Vec<String>> {
        let var = self.variable(name)?;
        Ok(var
            .dimensions()
            .iter()
            .map(|d| d.name().to_string())
            .collect())
    }

    /// Read a one-dimensional coordinate variable such as `x` or `y`.
    ///
    /// # Errors
    ///
    /// `VariableMissing` if absent, `ShapeMismatch` if the variable is not 1-D.
    pub fn axis(&self, name: &str) -> Result<Array1<f64>> {
        let var = self.variable(name)?;
        let rank = var.dimensions().len();
        if rank != 1 {
            return Err(GreenlandVizError::shape(format!(
                "axis variable '{}' must be 1-D, found rank {}",
                name, rank
            )));
        }

        let values: Vec<f64> = var.get_values::<f64, _>(..)?;
        Ok(Array1::from(values))
    }

    /// Read a whole variable of any rank.
    ///
    /// Fill, `missing_value` and out-of-range cells become NaN; packed values
    /// are unpacked with `scale_factor`/`add_offset`.
    pub fn array(&self, name: &str) -> Result<ArrayD<f64>> {
        let var = self.variable(name)?;
        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let values: Vec<f64> = var.get_values::<f64, _>(..)?;
        let mut data = ArrayD::from_shape_vec(shape, values)?;

        MaskAndScale::from_variable(&var).apply(data.iter_mut());
        Ok(data)
    }

    /// The variable's `_FillValue` attribute as f64, if it has one
    pub fn fill_value(&self, name: &str) -> Result<Option<f64>> {
        let var = self.variable(name)?;
        Ok(fill_value(&var))
    }

    /// The variable's `units` attribute, if it is a string
    pub fn units(&self, name: &str) -> Result<Option<String>> {
        let var = self.variable(name)?;
        Ok(string_attribute(&var, "units"))
    }

    /// Log dimensions and variables at debug level.
    pub fn describe(&self) {
        let mut dimensions: Vec<_> = self.file.dimensions().collect();
        dimensions.sort_by(|a, b| a.name().cmp(&b.name()));
        for dim in dimensions {
            debug!(dimension = %dim.name(), len = dim.len(), unlimited = dim.is_unlimited());
        }

        let mut variables: Vec<_> = self.file.variables().collect();
        variables.sort_by(|a, b| a.name().cmp(&b.name()));
        for var in variables {
            let dims: Vec<String> = var
                .dimensions()
                .iter()
                .map(|d| format!("{}[{}]", d.name(), d.len()))
                .collect();
            let units = string_attribute(&var, "units").unwrap_or_default();
            debug!(variable = %var.name(), dims = %dims.join(", "), units = %units);
        }
    }
}

/// Masking and unpacking attributes of one variable.
///
/// Applied the way netCDF masked reads do it: `_FillValue`, `missing_value`
/// and the valid range are checked against the stored values, then
/// `scale_factor` and `add_offset` unpack whatever is left.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MaskAndScale {
    fill: Option<f64>,
    missing: Vec<f64>,
    valid_min: Option<f64>,
    valid_max: Option<f64>,
    scale_factor: f64,
    add_offset: f64,
}

impl MaskAndScale {
    pub(crate) fn from_variable(var: &Variable<'_>) -> Self {
        let valid_range = numeric_attribute(var, "valid_range");
        let (valid_min, valid_max) = match valid_range.as_slice() {
            [lo, hi] => (Some(*lo), Some(*hi)),
            _ => (
                numeric_attribute(var, "valid_min").first().copied(),
                numeric_attribute(var, "valid_max").first().copied(),
            ),
        };

        Self {
            fill: fill_value(var),
            missing: numeric_attribute(var, "missing_value"),
            valid_min,
            valid_max,
            scale_factor: numeric_attribute(var, "scale_factor")
                .first()
                .copied()
                .unwrap_or(1.0),
            add_offset: numeric_attribute(var, "add_offset")
                .first()
                .copied()
                .unwrap_or(0.0),
        }
    }

    fn is_masked(&self, raw: f64) -> bool {
        self.fill == Some(raw)
            || self.missing.contains(&raw)
            || self.valid_min.is_some_and(|min| raw < min)
            || self.valid_max.is_some_and(|max| raw > max)
    }

    /// Replace masked cells with NaN and unpack the rest in place.
    pub(crate) fn apply<'a>(&self, values: impl IntoIterator<Item = &'a mut f64>) {
        for v in values {
            *v = if self.is_masked(*v) {
                f64::NAN
            } else {
                *v * self.scale_factor + self.add_offset
            };
        }
    }
}

pub(crate) fn fill_value(var: &Variable<'_>) -> Option<f64> {
    numeric_attribute(var, "_FillValue").first().copied()
}

/// A numeric attribute as f64 values; scalars give one element.
fn numeric_attribute(var: &Variable<'_>, name: &str) -> Vec<f64> {
    let Some(Ok(value)) = var.attribute(name).map(|attr| attr.value()) else {
        return Vec::new();
    };
    match value {
        AttributeValue::Uchar(v) => vec![f64::from(v)],
        AttributeValue::Uchars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Schar(v) => vec![f64::from(v)],
        AttributeValue::Schars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ushort(v) => vec![f64::from(v)],
        AttributeValue::Ushorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Short(v) => vec![f64::from(v)],
        AttributeValue::Shorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Uint(v) => vec![f64::from(v)],
        AttributeValue::Uints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Int(v) => vec![f64::from(v)],
        AttributeValue::Ints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ulonglong(v) => vec![v as f64],
        AttributeValue::Ulonglongs(v) => v.into_iter().map(|x| x as f64).collect(),
        AttributeValue::Longlong(v) => vec![v as f64],
        AttributeValue::Longlongs(v) => v.into_iter().map(|x| x as f64).collect(),
        AttributeValue::Float(v) => vec![f64::from(v)],
        AttributeValue::Floats(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Double(v) => vec![v],
        AttributeValue::Doubles(v) => v,
        AttributeValue::Str(_) | AttributeValue::Strs(_) => Vec::new(),
    }
}

pub(crate) fn string_attribute(var: &Variable<'_>, name: &str) -> Option<String> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}
