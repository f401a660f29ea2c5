use crate::output::print_json;
use anyhow::Context;
use shift_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let dir = paths::shifts_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let created = !paths::config_path(root).exists();
    if created {
        Config::default()
            .save(root)
            .context("failed to write config")?;
    }

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "config_created": created,
        }))?;
    } else if created {
        println!("Initialized roster in {}", dir.display());
    } else {
        println!("Roster already initialized in {}", dir.display());
    }
    Ok(())
}
