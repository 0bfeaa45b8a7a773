use num_complex::Complex64;

use crate::math::stats::StatsHelper;
use crate::prelude::{
    PrepError, PrepResult, ProcessingStage, StageConfig, StageInput, StageMetadata, StageOutput,
};
use crate::telemetry::log::LogManager;

/// Multiplies each visibility by its inverse-variance weight.
pub fn apply(vis: &[Complex64], weights: &[f64]) -> PrepResult<Vec<Complex64>> {
    if vis.len() != weights.len() {
        return Err(PrepError::LengthMismatch {
            u: vis.len(),
            v: vis.len(),
            vis: vis.len(),
            weights: weights.len(),
        });
    }
    Ok(vis
        .iter()
        .zip(weights)
        .map(|(&value, &weight)| value * weight)
        .collect())
}

/// Weight application stage; coordinates and weights are carried through.
pub struct WeightStage {
    ready: bool,
    logger: LogManager,
}

impl WeightStage {
    pub fn new() -> Self {
        Self {
            ready: false,
            logger: LogManager::new("weights"),
        }
    }
}

impl Default for WeightStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for WeightStage {
    fn initialize(&mut self, _config: &StageConfig) -> PrepResult<()> {
        self.ready = true;
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PrepResult<StageOutput> {
        if !self.ready {
            return Err(PrepError::Internal("stage not initialized".into()));
        }

        let weighted = apply(input.vis.vis(), input.vis.weights())?;
        let total_weight = StatsHelper::sum(input.vis.weights());
        self.logger
            .trace_detail(&format!("total weight {:.6}", total_weight));

        Ok(StageOutput {
            vis: input.vis.with_visibilities(weighted),
            metadata: StageMetadata {
                notes: vec![format!("total weight {:.6}", total_weight)],
                ..Default::default()
            },
        })
    }

    fn cleanup(&mut self) {
        self.ready = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::VisibilitySet;

    #[test]
    fn apply_scales_each_visibility() {
        let vis = vec![Complex64::new(1.0, 2.0), Complex64::new(-3.0, 0.5)];
        let weighted = apply(&vis, &[2.0, 0.25]).unwrap();
        assert_eq!(weighted[0], Complex64::new(2.0, 4.0));
        assert_eq!(weighted[1], Complex64::new(-0.75, 0.125));
    }

    #[test]
    fn unit_weights_are_identity() {
        let vis = vec![
            Complex64::new(1.5, -2.0),
            Complex64::new(0.0, 7.0),
            Complex64::new(-4.0, 0.0),
        ];
        assert_eq!(apply(&vis, &[1.0; 3]).unwrap(), vis);
    }

    #[test]
    fn apply_rejects_length_mismatch() {
        let vis = vec![Complex64::new(1.0, 0.0)];
        assert!(matches!(
            apply(&vis, &[1.0, 2.0]),
            Err(PrepError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn weight_stage_keeps_weights() {
        let mut stage = WeightStage::new();
        let config = StageConfig {
            cell_size_u: 1.0,
            cell_size_v: 1.0,
            grid_width: 8,
            grid_height: 8,
        };
        stage.initialize(&config).unwrap();
        let vis = VisibilitySet::new(
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![Complex64::new(1.0, 1.0), Complex64::new(2.0, -2.0)],
            vec![4.0, 0.5],
        )
        .unwrap();
        let output = stage.execute(StageInput { vis: vis.clone() }).unwrap();
        assert_eq!(output.vis.weights(), vis.weights());
        assert_eq!(output.vis.u(), vis.u());
        assert_eq!(output.vis.vis()[0], Complex64::new(4.0, 4.0));
        assert_eq!(output.vis.vis()[1], Complex64::new(1.0, -1.0));
        stage.cleanup();
    }
}
