//! The load → grid → reproject → select pipeline
//!
//! One pipeline serves every map: callers choose which fields to extract
//! instead of keeping a copy of the transform per figure.

use crate::dataset::Dataset;
use crate::errors::{GreenlandVizError, Result};
use crate::field::{select_fields, ScalarField};
use crate::grid::{meshgrid_ij, CoordinateGrid, GeoGrid};
use crate::projection::{ProjectionDefinition, Transformer};
use std::path::PathBuf;
use tracing::info;

/// Fields drawn on the Greenland maps
pub const DEFAULT_FIELDS: [&str; 2] = ["thk", "bheatflx"];

/// Names of the projected axis variables
pub const X_AXIS: &str = "x";
pub const Y_AXIS: &str = "y";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub dataset_path: PathBuf,
    pub fields: Vec<String>,
    /// Leading time/band index of every field
    pub leading_index: usize,
    pub source: ProjectionDefinition,
    pub target: ProjectionDefinition,
}

impl PipelineConfig {
    /// Thickness and basal heat flux at index 0, Greenland stereographic to WGS84
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            fields: DEFAULT_FIELDS.iter().map(|s| s.to_string()).collect(),
            leading_index: 0,
            source: ProjectionDefinition::greenland_stereographic(),
            target: ProjectionDefinition::geographic(),
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_leading_index(mut self, leading_index: usize) -> Self {
        self.leading_index = leading_index;
        self
    }

    pub fn with_projections(
        mut self,
        source: ProjectionDefinition,
        target: ProjectionDefinition,
    ) -> Self {
        self.source = source;
        self.target = target;
        self
    }
}

/// Everything handed to a renderer
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Projected coordinates, kept for exporters that write the native axes
    pub grid: CoordinateGrid,
    pub geo: GeoGrid,
    pub fields: Vec<ScalarField>,
}

impl PipelineOutput {
    pub fn field(&self, name: &str) -> Option<&ScalarField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Run the whole pipeline. Produces the full output or an error, never a part.
///
/// The dataset handle is closed before reprojection starts.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    let transformer = Transformer::new(&config.source, &config.target)?;

    let (x, y, fields) = {
        let dataset = Dataset::open(&config.dataset_path)?;
        let x = dataset.axis(X_AXIS)?;
        let y = dataset.axis(Y_AXIS)?;
        let fields = select_fields(&dataset, &config.fields, config.leading_index)?;
        (x, y, fields)
    };

    let grid = meshgrid_ij(x.view(), y.view())?;
    let shape = grid.shape();
    info!(ny = shape.0, nx = shape.1, "Built coordinate grid");

    for field in &fields {
        if field.shape() != shape {
            return Err(GreenlandVizError::shape(format!(
                "field '{}' has shape {:?}, grid is {:?}",
                field.name,
                field.shape(),
                shape
            )));
        }
    }

    let geo = transformer.transform_grid(&grid)?;
    info!(
        fields = fields.len(),
        source = %config.source,
        target = %config.target,
        "Reprojected grid"
    );

    Ok(PipelineOutput { grid, geo, fields })
}
