use anyhow::Context;
use clap::Parser;
use generator::profile::build_visibility_set;
use report::model::SummaryModel;
use report::writer::write_summary;
use std::path::PathBuf;
use uvcore::io::{read_visibility, write_fits2d, write_visibility, FitsWriteOptions};
use uvcore::processing::sampling_mask;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline visibility preparation driver")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Visibility file (`u v re im sigma` rows); synthetic data is used when absent
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long, default_value_t = 0.0)]
    cell_size_u: f64,
    #[arg(long, default_value_t = 0.0)]
    cell_size_v: f64,
    #[arg(long, default_value_t = 256)]
    grid_width: usize,
    #[arg(long, default_value_t = 256)]
    grid_height: usize,
    /// Number of synthetic samples
    #[arg(long, default_value_t = 512)]
    samples: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Save the generated raw samples before preparation
    #[arg(long)]
    save_synthetic: Option<PathBuf>,
    /// Write the prepared samples as a visibility file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write the sampling mask as a FITS image
    #[arg(long)]
    mask: Option<PathBuf>,
    /// Replace an existing mask file
    #[arg(long, default_value_t = false)]
    overwrite: bool,
    /// Mirror the mask columns before writing
    #[arg(long, default_value_t = false)]
    flip: bool,
    /// Write a JSON run summary
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            args.cell_size_u,
            args.cell_size_v,
            args.grid_width,
            args.grid_height,
        )
    };

    let raw = if let Some(path) = &args.input {
        read_visibility(path).with_context(|| format!("reading visibilities {}", path.display()))?
    } else {
        let vis = build_visibility_set(args.samples, args.seed)?;
        if let Some(path) = &args.save_synthetic {
            write_visibility(path, &vis)
                .with_context(|| format!("writing synthetic visibilities {}", path.display()))?;
        }
        vis
    };

    let runner = Runner::new(workflow_config);
    let result = runner.execute(&raw)?;

    println!(
        "Prepared {} -> {} samples, pixel size {:.6} x {:.6} arcsec",
        result.input_samples,
        result.vis.len(),
        result.cell_size.u,
        result.cell_size.v
    );

    if let Some(path) = &args.output {
        write_visibility(path, &result.vis)
            .with_context(|| format!("writing prepared visibilities {}", path.display()))?;
    }

    if let Some(path) = &args.mask {
        let config = runner.config();
        let mask = sampling_mask(&result.vis, config.grid_width, config.grid_height)
            .context("building sampling mask")?;
        let options = FitsWriteOptions {
            overwrite: args.overwrite,
            flip: args.flip,
        };
        write_fits2d(&mask, path, options)
            .with_context(|| format!("writing sampling mask {}", path.display()))?;
    }

    if let Some(path) = &args.report {
        let model = SummaryModel::from_result(&result, runner.config());
        write_summary(path, &model)?;
    }

    Ok(())
}
