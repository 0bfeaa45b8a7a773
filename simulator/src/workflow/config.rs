use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uvcore::prelude::StageConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Arcseconds; `0.0` derives the cell size from the longest baseline.
    pub cell_size_u: f64,
    pub cell_size_v: f64,
    pub grid_width: usize,
    pub grid_height: usize,
    pub symmetrize: bool,
    pub apply_weights: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            cell_size_u: 0.0,
            cell_size_v: 0.0,
            grid_width: 256,
            grid_height: 256,
            symmetrize: true,
            apply_weights: true,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        cell_size_u: f64,
        cell_size_v: f64,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self {
            cell_size_u,
            cell_size_v,
            grid_width,
            grid_height,
            ..Default::default()
        }
    }

    pub fn to_stage_config(&self) -> StageConfig {
        StageConfig {
            cell_size_u: self.cell_size_u,
            cell_size_v: self.cell_size_v,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_stage_config() {
        let cfg = WorkflowConfig::from_args(0.5, 0.0, 512, 128);
        let stage = cfg.to_stage_config();
        assert_eq!(stage.grid_width, 512);
        assert_eq!(stage.grid_height, 128);
        assert_eq!(stage.cell_size_u, 0.5);
        assert!(cfg.symmetrize && cfg.apply_weights);
    }

    #[test]
    fn config_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"cell_size_u: 0.3\ngrid_width: 64\nsymmetrize: false\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.cell_size_u, 0.3);
        assert_eq!(cfg.cell_size_v, 0.0);
        assert_eq!(cfg.grid_width, 64);
        assert_eq!(cfg.grid_height, 256);
        assert!(!cfg.symmetrize);
        assert!(cfg.apply_weights);
    }

    #[test]
    fn config_load_reports_bad_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"grid_width: wide\n").unwrap();
        let err = WorkflowConfig::load(temp.path()).unwrap_err();
        assert!(err.to_string().starts_with("parsing workflow config"));
    }
}
