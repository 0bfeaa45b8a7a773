use std::f64::consts::PI;

use log::info;
use serde::{Deserialize, Serialize};

use crate::interface::VisibilitySet;
use crate::math::stats::StatsHelper;
use crate::prelude::{PrepError, PrepResult};

/// Arcseconds in π radians.
pub const ARCSEC_PER_PI_RADIANS: f64 = 180.0 * 3600.0;

/// Pixel size adopted for imaging, in arcseconds per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub u: f64,
    pub v: f64,
    /// PSF full width at half maximum, present only when the cell size was
    /// derived from the data.
    pub psf_fwhm: Option<(f64, f64)>,
}

/// Adopts the caller's cell sizes or derives them from the sampled baselines.
///
/// `0.0` means unset. When both axes are unset each axis is derived from its
/// largest absolute coordinate; when only `v` is unset it follows `u`.
pub fn estimate_cell_size(
    vis: &VisibilitySet,
    cell_size_u: f64,
    cell_size_v: f64,
) -> PrepResult<CellSize> {
    check_supplied("u", cell_size_u)?;
    check_supplied("v", cell_size_v)?;

    let mut cell = CellSize {
        u: cell_size_u,
        v: cell_size_v,
        psf_fwhm: None,
    };

    if cell.u == 0.0 && cell.v == 0.0 {
        if vis.is_empty() {
            return Err(PrepError::Domain(
                "cannot derive a cell size from an empty visibility set".into(),
            ));
        }
        cell.u = derive_axis("u", vis.u())?;
        cell.v = derive_axis("v", vis.v())?;
        let fwhm = (cell.u * 3.0, cell.v * 3.0);
        info!("PSF has a FWHM of {} x {} arcseconds", fwhm.0, fwhm.1);
        cell.psf_fwhm = Some(fwhm);
    }
    if cell.v == 0.0 {
        cell.v = cell.u;
    }

    info!("Using a pixel size of {} x {} arcseconds", cell.u, cell.v);
    Ok(cell)
}

fn check_supplied(axis: &str, cell_size: f64) -> PrepResult<()> {
    if !cell_size.is_finite() || cell_size < 0.0 {
        return Err(PrepError::Domain(format!(
            "cell size for {} must be finite and non-negative, got {}",
            axis, cell_size
        )));
    }
    Ok(())
}

fn derive_axis(axis: &str, coords: &[f64]) -> PrepResult<f64> {
    let max_coord = StatsHelper::max_abs(coords);
    let cell_size = ARCSEC_PER_PI_RADIANS / max_coord / PI / 3.0 * 1.02;
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(PrepError::Domain(format!(
            "cannot derive {} cell size: maximum |{}| is {}",
            axis, axis, max_coord
        )));
    }
    Ok(cell_size)
}
