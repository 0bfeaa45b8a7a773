pub mod cell_size;
pub mod coverage;
pub mod scale;
pub mod symmetry;
pub mod weights;

pub use cell_size::{estimate_cell_size, CellSize};
pub use coverage::sampling_mask;
pub use scale::{to_pixels, to_radians, PixelScaleStage, RadianScaleStage};
pub use symmetry::{expand, SymmetryStage};
pub use weights::{apply, WeightStage};
