use std::f64::consts::PI;

use crate::interface::VisibilitySet;
use crate::prelude::{
    PrepError, PrepResult, ProcessingStage, StageConfig, StageInput, StageMetadata, StageOutput,
};
use crate::processing::cell_size::{estimate_cell_size, ARCSEC_PER_PI_RADIANS};
use crate::telemetry::log::LogManager;

/// Rescales coordinates into radians times 2π for the given pixel size.
///
/// `scale = 180 * 3600 / cell_size / π`, `u' = u / scale * 2π`. Visibilities
/// and weights are carried over unchanged.
pub fn to_radians(
    vis: &VisibilitySet,
    cell_size_u: f64,
    cell_size_v: f64,
) -> PrepResult<VisibilitySet> {
    let scale_u = scale_factor("u", cell_size_u)?;
    let scale_v = scale_factor("v", cell_size_v)?;
    let u = vis.u().iter().map(|&u| u / scale_u * 2.0 * PI).collect();
    let v = vis.v().iter().map(|&v| v / scale_v * 2.0 * PI).collect();
    Ok(vis.with_coordinates(u, v))
}

/// Rescales coordinates from radians times 2π into grid pixels.
pub fn to_pixels(vis: &VisibilitySet, grid_width: usize, grid_height: usize) -> VisibilitySet {
    let width = grid_width as f64;
    let height = grid_height as f64;
    let u = vis.u().iter().map(|&u| u / (2.0 * PI) * width).collect();
    let v = vis.v().iter().map(|&v| v / (2.0 * PI) * height).collect();
    vis.with_coordinates(u, v)
}

fn scale_factor(axis: &str, cell_size: f64) -> PrepResult<f64> {
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(PrepError::Domain(format!(
            "cell size for {} must be positive, got {}",
            axis, cell_size
        )));
    }
    Ok(ARCSEC_PER_PI_RADIANS / cell_size / PI)
}

/// Adopts a cell size and converts coordinates to radians times 2π.
pub struct RadianScaleStage {
    config: Option<StageConfig>,
    logger: LogManager,
}

impl RadianScaleStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("radian-scale"),
        }
    }
}

impl Default for RadianScaleStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for RadianScaleStage {
    fn initialize(&mut self, config: &StageConfig) -> PrepResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PrepResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| PrepError::Internal("stage not initialized".into()))?;

        let cell = estimate_cell_size(&input.vis, config.cell_size_u, config.cell_size_v)?;
        let scaled = to_radians(&input.vis, cell.u, cell.v)?;

        let mut notes = Vec::new();
        if let Some((fwhm_u, fwhm_v)) = cell.psf_fwhm {
            notes.push(format!("psf fwhm {:.6} x {:.6} arcsec", fwhm_u, fwhm_v));
        }
        notes.push(format!("pixel size {:.6} x {:.6} arcsec", cell.u, cell.v));
        self.logger
            .record(&format!("scaled {} samples to radians", scaled.len()));

        Ok(StageOutput {
            vis: scaled,
            metadata: StageMetadata {
                cell_size: Some(cell),
                notes,
            },
        })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

/// Converts radian coordinates to pixels of the configured grid.
pub struct PixelScaleStage {
    grid: Option<(usize, usize)>,
    logger: LogManager,
}

impl PixelScaleStage {
    pub fn new() -> Self {
        Self {
            grid: None,
            logger: LogManager::new("pixel-scale"),
        }
    }
}

impl Default for PixelScaleStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for PixelScaleStage {
    fn initialize(&mut self, config: &StageConfig) -> PrepResult<()> {
        if config.grid_width == 0 || config.grid_height == 0 {
            return Err(PrepError::Domain(format!(
                "grid must be non-empty, got {}x{}",
                config.grid_width, config.grid_height
            )));
        }
        self.grid = Some((config.grid_width, config.grid_height));
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> PrepResult<StageOutput> {
        let (width, height) = self
            .grid
            .ok_or_else(|| PrepError::Internal("stage not initialized".into()))?;

        let scaled = to_pixels(&input.vis, width, height);
        self.logger
            .record(&format!("scaled {} samples to a {}x{} grid", scaled.len(), width, height));

        Ok(StageOutput {
            vis: scaled,
            metadata: StageMetadata {
                notes: vec![format!("grid {}x{}", width, height)],
                ..Default::default()
            },
        })
    }

    fn cleanup(&mut self) {
        self.grid = None;
    }
}
