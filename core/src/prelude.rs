use serde::{Deserialize, Serialize};

use crate::interface::VisibilitySet;
use crate::processing::CellSize;

/// Shared configuration for each preparation stage.
///
/// Cell sizes are in arcseconds, `0.0` meaning "derive from the data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub cell_size_u: f64,
    pub cell_size_v: f64,
    pub grid_width: usize,
    pub grid_height: usize,
}

/// Input payload for a preparation stage.
#[derive(Debug, Clone)]
pub struct StageInput {
    pub vis: VisibilitySet,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub vis: VisibilitySet,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and reporting.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub cell_size: Option<CellSize>,
    pub notes: Vec<String>,
}

/// Common error type for the preparation core.
#[derive(thiserror::Error, Debug)]
pub enum PrepError {
    #[error("length mismatch: u={u} v={v} vis={vis} weights={weights}")]
    LengthMismatch {
        u: usize,
        v: usize,
        vis: usize,
        weights: usize,
    },
    #[error("domain error: {0}")]
    Domain(String),
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("fits error: {0}")]
    Fits(#[from] fitsio::errors::Error),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type PrepResult<T> = Result<T, PrepError>;

/// Trait describing the chained visibility preparation stages.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &StageConfig) -> PrepResult<()>;
    fn execute(&mut self, input: StageInput) -> PrepResult<StageOutput>;
    fn cleanup(&mut self);
}
