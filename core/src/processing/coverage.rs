use ndarray::Array2;

use crate::interface::VisibilitySet;
use crate::math::index::{linear_index, wrap_mod};
use crate::prelude::{PrepError, PrepResult};

/// Counts samples per cell of a `height x width` grid.
///
/// Coordinates must already be in pixel units. Each is rounded to the nearest
/// cell and wrapped onto the periodic grid, so negative frequencies land in
/// the upper half as they do in an unshifted FFT grid.
pub fn sampling_mask(vis: &VisibilitySet, width: usize, height: usize) -> PrepResult<Array2<f64>> {
    if width == 0 || height == 0 {
        return Err(PrepError::Domain(format!(
            "grid must be non-empty, got {}x{}",
            width, height
        )));
    }

    let mut counts = vec![0.0; width * height];
    for (&u, &v) in vis.u().iter().zip(vis.v()) {
        let col = wrap_mod(u.round(), width as f64)? as usize;
        let row = wrap_mod(v.round(), height as f64)? as usize;
        counts[linear_index(row, col, height, width)] += 1.0;
    }

    Array2::from_shape_vec((height, width), counts)
        .map_err(|err| PrepError::Internal(format!("mask shape: {}", err)))
}
