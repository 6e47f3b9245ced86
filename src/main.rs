//! Entry point for greenland-viz.
//! Resolves the dataset, runs the reprojection pipeline and prints a summary.

use anyhow::Context;
use clap::Parser;
use greenland_viz::config::AppConfig;
use greenland_viz::pipeline::{self, PipelineConfig};
use greenland_viz::render::{Renderer, SummaryRenderer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    println!(
        r#"
------------------------------------------------------------------
                 Greenland ice-sheet grid reprojection
------------------------------------------------------------------
"#
    );

    let config = AppConfig::resolve(args.dataset.as_deref())?;
    let dataset_path = config.dataset_path();
    info!(path = %dataset_path.display(), "Loading dataset");

    let output = pipeline::run(&PipelineConfig::new(&dataset_path))
        .with_context(|| format!("failed to process {}", dataset_path.display()))?;

    SummaryRenderer.render(&output)?;
    Ok(())
}
