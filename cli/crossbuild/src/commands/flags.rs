//! `crossbuild --print-flags` — show the metadata that would be embedded.

use std::path::Path;

use anyhow::Result;
use crossbuild_core::{BuildMetadata, LinkerFlagSet};
use serde_json::json;

use crate::commands::build::prepare;
use crate::manifest::CrossbuildManifest;

/// Gather metadata and print it with the rendered `-ldflags` value.
pub fn run(project_dir: &Path, manifest: Option<&CrossbuildManifest>, json: bool) -> Result<()> {
    let prepared = prepare(project_dir, manifest)?;
    println!("{}", render(&prepared.metadata, &prepared.flags, json)?);
    Ok(())
}

fn render(metadata: &BuildMetadata, flags: &LinkerFlagSet, json: bool) -> Result<String> {
    if json {
        let value = json!({
            "metadata": metadata,
            "ldflags": flags.render(),
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let show = |v: &str| if v.is_empty() { "(none)".to_string() } else { v.to_string() };
    let lines = [
        format!("Package:    {}", metadata.package),
        format!("Version:    {}", show(&metadata.version)),
        format!("Branch:     {}", show(&metadata.branch)),
        format!("Commit:     {}", show(&metadata.commit_id)),
        format!("Build time: {}", metadata.build_time),
        String::new(),
        format!("-ldflags \"{}\"", flags.render()),
    ];
    Ok(lines.join("\n"))
}
