//! Visibility preparation core for interferometric imaging.
//!
//! Raw `(u, v, visibility, sigma)` samples are ingested, rescaled between
//! arcsecond, angular-frequency and pixel units, expanded with their
//! conjugate-symmetric mirror and weighted before being handed to a gridder.
//! The grid index helpers and the FITS image adapter share one addressing
//! convention so images never come back transposed.

pub mod interface;
pub mod io;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use interface::VisibilitySet;
pub use prelude::{PrepError, PrepResult, ProcessingStage, StageInput, StageOutput};
