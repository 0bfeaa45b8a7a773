use crate::report::model::SummaryModel;
use anyhow::Context;
use std::fs;
use std::path::Path;

pub fn write_summary<P: AsRef<Path>>(path: P, model: &SummaryModel) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
    }
    let body = serde_json::to_string_pretty(model).context("serializing summary")?;
    fs::write(path, body).with_context(|| format!("writing summary {}", path.display()))?;
    Ok(())
}
