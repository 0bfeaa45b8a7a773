use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use uvcore::prelude::{ProcessingStage, StageConfig, StageInput, StageOutput};
use uvcore::processing::{CellSize, PixelScaleStage, RadianScaleStage, SymmetryStage, WeightStage};
use uvcore::VisibilitySet;

#[derive(Debug)]
pub struct WorkflowResult {
    /// Prepared samples in pixel units of the configured grid.
    pub vis: VisibilitySet,
    pub cell_size: CellSize,
    pub input_samples: usize,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn execute(&self, vis: &VisibilitySet) -> anyhow::Result<WorkflowResult> {
        let stage_config = self.config.to_stage_config();
        let mut notes = Vec::new();

        let radians = run_stage(
            &mut RadianScaleStage::new(),
            "radian scale",
            &stage_config,
            vis.clone(),
        )?;
        let cell_size = radians
            .metadata
            .cell_size
            .context("radian scale stage did not report a cell size")?;
        notes.extend(radians.metadata.notes);
        let mut current = radians.vis;

        if self.config.symmetrize {
            let output = run_stage(&mut SymmetryStage::new(), "symmetry", &stage_config, current)?;
            notes.extend(output.metadata.notes);
            current = output.vis;
        }

        if self.config.apply_weights {
            let output = run_stage(&mut WeightStage::new(), "weights", &stage_config, current)?;
            notes.extend(output.metadata.notes);
            current = output.vis;
        }

        let pixels = run_stage(
            &mut PixelScaleStage::new(),
            "pixel scale",
            &stage_config,
            current,
        )?;
        notes.extend(pixels.metadata.notes);

        Ok(WorkflowResult {
            vis: pixels.vis,
            cell_size,
            input_samples: vis.len(),
            notes,
        })
    }
}

fn run_stage(
    stage: &mut dyn ProcessingStage,
    name: &str,
    config: &StageConfig,
    vis: VisibilitySet,
) -> anyhow::Result<StageOutput> {
    stage
        .initialize(config)
        .with_context(|| format!("initializing {} stage", name))?;
    let output = stage
        .execute(StageInput { vis })
        .with_context(|| format!("executing {} stage", name))?;
    stage.cleanup();
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_visibility_set;
    use num_complex::Complex64;

    #[test]
    fn runner_executes_workflow() {
        let cfg = WorkflowConfig::from_args(0.0, 0.0, 64, 64);
        let runner = Runner::new(cfg);
        let vis = build_visibility_set(32, 7).unwrap();
        let result = runner.execute(&vis).unwrap();
        assert_eq!(result.input_samples, 32);
        assert_eq!(result.vis.len(), 64);
        assert!(result.cell_size.psf_fwhm.is_some());
        assert!(result.notes.iter().any(|n| n.starts_with("pixel size")));
    }

    #[test]
    fn runner_respects_disabled_stages() {
        let mut cfg = WorkflowConfig::from_args(1.0, 1.0, 32, 32);
        cfg.symmetrize = false;
        cfg.apply_weights = false;
        let vis = VisibilitySet::new(
            vec![100.0],
            vec![-50.0],
            vec![Complex64::new(2.0, 1.0)],
            vec![4.0],
        )
        .unwrap();
        let result = Runner::new(cfg).execute(&vis).unwrap();
        assert_eq!(result.vis.len(), 1);
        assert_eq!(result.vis.vis()[0], Complex64::new(2.0, 1.0));
        assert!(result.cell_size.psf_fwhm.is_none());
    }

    #[test]
    fn runner_surfaces_degenerate_input() {
        let runner = Runner::new(WorkflowConfig::default());
        let vis = VisibilitySet::new(
            vec![0.0, 0.0],
            vec![1.0, 2.0],
            vec![Complex64::new(1.0, 0.0); 2],
            vec![1.0; 2],
        )
        .unwrap();
        match runner.execute(&vis) {
            Err(err) => assert!(err.to_string().contains("radian scale")),
            Ok(result) => panic!("expected failure, got {:?}", result),
        }
    }
}
