use crate::interface::VisibilitySet;
use crate::prelude::{
    PrepError, PrepResult, ProcessingStage, StageConfig, StageInput, StageMetadata, StageOutput,
};
use crate::telemetry::log::LogManager;

/// Appends the conjugate-symmetric mirror of every sample.
///
/// The output holds the original `n` samples followed by `n` samples at
/// `(-u, -v)` with conjugated visibilities and copied weights. Samples that
/// are their own mirror (the origin) are duplicated as well.
pub fn expand(vis: &VisibilitySet) -> VisibilitySet {
    let u = vis
        .u()
        .iter()
        .copied()
        .chain(vis.u().iter().map(|&u| -u))
        .collect();
    let v = vis
        .v()
        .iter()
        .copied()
        .chain(vis.v().iter().map(|&v| -v))
        .collect();
    let values = vis
        .vis()
        .iter()
        .copied()
        .chain(vis.vis().iter().map(|value| value.conj()))
        .collect();
    let weights = vis
        .weights()
        .iter()
        .chain(vis.weights().iter())
        .copied()
        .collect();

    VisibilitySet::from_aligned(u, v, values, weights)
}

/// Conjugate-symmetry expansion stage.
pub struct SymmetryStage {
    ready: bool,
    logger: LogManager,
}

impl SymmetryStage {
    pub fn new() -> Self {
        Self {
            ready: false,
            logger: LogManager::new("symmetry"),
        }
    }
}

impl Default for SymmetryStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for SymmetryStage {
    fn initialize(&mut self, _config: &StageConfig) -> PrepResult<()> {
        self.ready = true;
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PrepResult<StageOutput> {
        if !self.ready {
            return Err(PrepError::Internal("stage not initialized".into()));
        }

        let expanded = expand(&input.vis);
        self.logger.record(&format!(
            "expanded {} samples to {}",
            input.vis.len(),
            expanded.len()
        ));

        Ok(StageOutput {
            vis: expanded,
            metadata: StageMetadata {
                notes: vec![format!("mirrored {} samples", input.vis.len())],
                ..Default::default()
            },
        })
    }

    fn cleanup(&mut self) {
        self.ready = false;
    }
}
