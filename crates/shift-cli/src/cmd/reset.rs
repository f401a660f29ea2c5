use super::open_store;
use crate::output::print_json;
use std::path::Path;

pub fn run(root: &Path, yes: bool, json: bool) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!("reset erases every staff member, assignment and rule; re-run with --yes");
    }
    let mut store = open_store(root)?;
    store.reset();

    if json {
        print_json(&serde_json::json!({ "reset": true }))?;
    } else {
        println!("Roster reset.");
    }
    Ok(())
}
