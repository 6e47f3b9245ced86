//! Hand-off to rendering collaborators
//!
//! Drawing coastlines and contours happens outside this crate. A
//! [`Renderer`] receives the finished [`PipelineOutput`] and nothing else.

use crate::errors::Result;
use crate::pipeline::PipelineOutput;

/// Consumer of a finished pipeline run, such as a map plot or a file export
pub trait Renderer {
    /// Draw, print or store `output`. Errors abort the hand-off.
    fn render(&mut self, output: &PipelineOutput) -> Result<()>;
}

/// Prints the geographic extent and per-field statistics to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryRenderer;

impl Renderer for SummaryRenderer {
    fn render(&mut self, output: &PipelineOutput) -> Result<()> {
        let (ny, nx) = output.geo.shape();
        println!("\n Reprojected Grid");
        println!("==================");
        println!("   Shape: ({} × {})", ny, nx);

        match output.geo.bounds() {
            Some(b) => {
                println!("   Longitude: {:.3} .. {:.3}", b.min_lon, b.max_lon);
                println!("   Latitude:  {:.3} .. {:.3}", b.min_lat, b.max_lat);
            }
            None => println!("   (no finite coordinates)"),
        }

        for field in &output.fields {
            let units = field.units.as_deref().unwrap_or("-");
            println!("\n Field: {} [{}]", field.name, units);
            match field.summary() {
                Some(s) => {
                    println!("   Min: {:.3}", s.min);
                    println!("   Mean: {:.3}", s.mean);
                    println!("   Max: {:.3}", s.max);
                    println!("   Valid cells: {} / {}", s.valid, s.total);
                }
                None => println!("   ⚠ No valid (finite) data"),
            }
        }

        Ok(())
    }
}
