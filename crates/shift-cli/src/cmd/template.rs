use super::open_store;
use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum TemplateSubcommand {
    /// Snapshot every current assignment as a named template
    Save {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// List templates
    List,
    /// Stamp a template onto the calendar; its earliest day lands on ANCHOR
    Apply { id: String, anchor: NaiveDate },
    /// Delete a template
    Remove { id: String },
}

pub fn run(root: &Path, subcmd: TemplateSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TemplateSubcommand::Save { name } => save(root, &name.join(" "), json),
        TemplateSubcommand::List => list(root, json),
        TemplateSubcommand::Apply { id, anchor } => apply(root, &id, anchor, json),
        TemplateSubcommand::Remove { id } => remove(root, &id, json),
    }
}

fn save(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let id = store.save_template(name);
    let count = store.patterns().len();

    if json {
        print_json(&serde_json::json!({ "id": id, "name": name, "patterns": count }))?;
    } else {
        println!("Saved template [{id}]: {name} ({count} assignments)");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = open_store(root)?;

    if json {
        return print_json(&store.templates());
    }
    if store.templates().is_empty() {
        println!("No templates. Run: shifts template save <name>");
        return Ok(());
    }
    let rows = store
        .templates()
        .iter()
        .map(|t| {
            let last = t.patterns.iter().map(|p| p.date).max();
            let span = match (t.first_date(), last) {
                (Some(a), Some(b)) => format!("{a}..{b}"),
                _ => "-".to_string(),
            };
            vec![t.id.clone(), t.name.clone(), t.patterns.len().to_string(), span]
        })
        .collect();
    print_table(&["ID", "NAME", "ASSIGNMENTS", "SPAN"], rows);
    Ok(())
}

fn apply(root: &Path, id: &str, anchor: NaiveDate, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let outcome = store
        .apply_template(id, anchor)
        .with_context(|| format!("template '{id}' not found"))?;

    if json {
        print_json(&serde_json::json!({
            "id": id,
            "anchor": anchor,
            "inserted": outcome.inserted,
            "replaced": outcome.replaced,
            "unchanged": outcome.unchanged,
            "skipped": outcome.skipped,
        }))?;
    } else {
        println!(
            "Applied template [{id}] at {anchor}: {} new, {} replaced, {} unchanged, {} skipped",
            outcome.inserted, outcome.replaced, outcome.unchanged, outcome.skipped
        );
    }
    Ok(())
}

fn remove(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    if !store.remove_template(id) {
        anyhow::bail!("template '{id}' not found");
    }

    if json {
        print_json(&serde_json::json!({ "id": id, "removed": true }))?;
    } else {
        println!("Removed template [{id}]");
    }
    Ok(())
}
