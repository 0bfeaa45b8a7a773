use num_complex::Complex64;

use crate::prelude::{PrepError, PrepResult};

/// Index-aligned visibility samples flowing through the preparation stages.
///
/// `u`, `v`, `vis` and `weights` always have the same length and every
/// weight is finite and non-negative. The units of
/// `u`/`v` depend on the stage that produced the set (arcsecond-scaled
/// wavelengths, radians times 2π, or pixels). Weights are inverse variances.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilitySet {
    u: Vec<f64>,
    v: Vec<f64>,
    vis: Vec<Complex64>,
    weights: Vec<f64>,
}

impl VisibilitySet {
    pub fn new(
        u: Vec<f64>,
        v: Vec<f64>,
        vis: Vec<Complex64>,
        weights: Vec<f64>,
    ) -> PrepResult<Self> {
        let len = u.len();
        if v.len() != len || vis.len() != len || weights.len() != len {
            return Err(PrepError::LengthMismatch {
                u: u.len(),
                v: v.len(),
                vis: vis.len(),
                weights: weights.len(),
            });
        }
        if let Some((index, weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(PrepError::Domain(format!(
                "weight {} at sample {} must be finite and non-negative",
                weight, index
            )));
        }
        Ok(Self { u, v, vis, weights })
    }

    pub fn empty() -> Self {
        Self {
            u: Vec::new(),
            v: Vec::new(),
            vis: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    pub fn u(&self) -> &[f64] {
        &self.u
    }

    pub fn v(&self) -> &[f64] {
        &self.v
    }

    pub fn vis(&self) -> &[Complex64] {
        &self.vis
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Assembles a set from vectors the caller has already length-matched.
    pub(crate) fn from_aligned(
        u: Vec<f64>,
        v: Vec<f64>,
        vis: Vec<Complex64>,
        weights: Vec<f64>,
    ) -> Self {
        debug_assert!(v.len() == u.len() && vis.len() == u.len() && weights.len() == u.len());
        Self { u, v, vis, weights }
    }

    /// Builds a set with new coordinates, keeping visibilities and weights.
    pub(crate) fn with_coordinates(&self, u: Vec<f64>, v: Vec<f64>) -> Self {
        debug_assert_eq!(u.len(), self.len());
        debug_assert_eq!(v.len(), self.len());
        Self {
            u,
            v,
            vis: self.vis.clone(),
            weights: self.weights.clone(),
        }
    }

    /// Builds a set with new visibilities, keeping coordinates and weights.
    pub(crate) fn with_visibilities(&self, vis: Vec<Complex64>) -> Self {
        debug_assert_eq!(vis.len(), self.len());
        Self {
            u: self.u.clone(),
            v: self.v.clone(),
            vis,
            weights: self.weights.clone(),
        }
    }
}
