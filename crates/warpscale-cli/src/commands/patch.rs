use std::path::Path;

use anyhow::Context;
use warpscale_convert::patch_spec;
use warpscale_core::HpaDocument;
use warpscale_core::config::HpaSpecConfig;

pub fn patch(old: &str, new: &str, prefix: &str) -> anyhow::Result<()> {
    println!("{}", render_patch(Path::new(old), Path::new(new), prefix)?);
    Ok(())
}

fn first_spec(path: &Path) -> anyhow::Result<HpaSpecConfig> {
    HpaDocument::from_file(path)?
        .spec
        .into_iter()
        .next()
        .with_context(|| format!("{} has no spec block", path.display()))
}

fn render_patch(old: &Path, new: &Path, prefix: &str) -> anyhow::Result<String> {
    let ops = patch_spec(prefix, &first_spec(old)?, &first_spec(new)?)?;
    Ok(serde_json::to_string_pretty(&json_patch::Patch(ops))?)
}
