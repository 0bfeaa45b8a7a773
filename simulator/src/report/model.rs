use crate::workflow::config::WorkflowConfig;
use crate::workflow::runner::WorkflowResult;
use serde::{Deserialize, Serialize};

/// JSON summary of one preparation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryModel {
    pub input_samples: usize,
    pub output_samples: usize,
    pub cell_size_u: f64,
    pub cell_size_v: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psf_fwhm: Option<(f64, f64)>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub notes: Vec<String>,
}

impl SummaryModel {
    pub fn from_result(result: &WorkflowResult, config: &WorkflowConfig) -> Self {
        Self {
            input_samples: result.input_samples,
            output_samples: result.vis.len(),
            cell_size_u: result.cell_size.u,
            cell_size_v: result.cell_size.v,
            psf_fwhm: result.cell_size.psf_fwhm,
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            notes: result.notes.clone(),
        }
    }
}
