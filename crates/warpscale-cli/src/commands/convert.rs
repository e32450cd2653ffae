use std::path::Path;

use anyhow::Context;
use tracing::info;
use warpscale_convert::{expand_spec, flatten_spec};
use warpscale_core::{HorizontalPodAutoscalerSpec, HpaDocument};

pub fn expand(path: &str) -> anyhow::Result<()> {
    println!("{}", render_expanded(Path::new(path))?);
    Ok(())
}

pub fn flatten(path: &str, format: &str) -> anyhow::Result<()> {
    println!("{}", render_flattened(Path::new(path), format)?);
    Ok(())
}

pub fn validate(path: &str) -> anyhow::Result<()> {
    let doc = HpaDocument::from_file(Path::new(path))?;
    match expand_spec(&doc.spec) {
        Ok(spec) => {
            println!(
                "✓ {path}: {} metric(s), replicas {}..{}",
                spec.metrics.len(),
                spec.min_replicas.unwrap_or(1),
                spec.max_replicas
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Validation failed: {e}");
            Err(e.into())
        }
    }
}

fn render_expanded(path: &Path) -> anyhow::Result<String> {
    let doc = HpaDocument::from_file(path)?;
    let spec = expand_spec(&doc.spec)
        .with_context(|| format!("failed to expand {}", path.display()))?;
    info!(file = %path.display(), metrics = spec.metrics.len(), "expanded spec");
    Ok(serde_json::to_string_pretty(&spec)?)
}

fn render_flattened(path: &Path, format: &str) -> anyhow::Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let spec: HorizontalPodAutoscalerSpec = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid autoscaler spec", path.display()))?;

    let doc = HpaDocument {
        spec: flatten_spec(&spec),
    };

    match format {
        "json" => Ok(doc.to_json_string()?),
        "toml" => Ok(doc.to_toml_string()?),
        other => anyhow::bail!("unsupported output format: {other}"),
    }
}
