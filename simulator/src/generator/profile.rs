use crate::generator::template::point_source;
use anyhow::{ensure, Context};
use num_complex::Complex64;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uvcore::VisibilitySet;

/// Configuration for generating synthetic visibilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub samples: usize,
    /// Longest baseline in wavelengths; samples fill a disk of this radius.
    pub max_baseline: f64,
    pub flux: f64,
    pub offset_l_arcsec: f64,
    pub offset_m_arcsec: f64,
    /// Per-sample noise amplitude, also used for the weights.
    pub sigma: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 512,
            max_baseline: 2000.0,
            flux: 1.0,
            offset_l_arcsec: 0.0,
            offset_m_arcsec: 0.0,
            sigma: 0.05,
            seed: 0,
        }
    }
}

pub fn build_visibility_set_from_config(config: &GeneratorConfig) -> anyhow::Result<VisibilitySet> {
    ensure!(config.sigma > 0.0, "generator sigma must be positive");
    ensure!(
        config.max_baseline > 0.0,
        "generator max_baseline must be positive"
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut u = Vec::with_capacity(config.samples);
    let mut v = Vec::with_capacity(config.samples);
    let mut vis = Vec::with_capacity(config.samples);

    for _ in 0..config.samples {
        let radius = config.max_baseline * rng.gen::<f64>().sqrt();
        let angle = rng.gen_range(0.0..2.0 * PI);
        let (sample_u, sample_v) = (radius * angle.cos(), radius * angle.sin());
        let jitter = Complex64::new(
            rng.gen_range(-config.sigma..config.sigma),
            rng.gen_range(-config.sigma..config.sigma),
        );
        let model = point_source(
            sample_u,
            sample_v,
            config.offset_l_arcsec,
            config.offset_m_arcsec,
            config.flux,
        );
        u.push(sample_u);
        v.push(sample_v);
        vis.push(model + jitter);
    }

    let weight = 1.0 / (config.sigma * config.sigma);
    VisibilitySet::new(u, v, vis, vec![weight; config.samples])
        .context("assembling synthetic visibilities")
}

pub fn build_visibility_set(samples: usize, seed: u64) -> anyhow::Result<VisibilitySet> {
    let config = GeneratorConfig {
        samples,
        seed,
        ..Default::default()
    };
    build_visibility_set_from_config(&config)
}
