//! Roster command implementation
use super::load_params;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct RosterEntry<'a> {
    index: usize,
    name: &'a str,
    actor_class: &'a str,
    implementation: &'a str,
}

/// Print the actors of a trial in roster order
pub fn show_roster(params_path: &Path, json: bool) -> Result<()> {
    let params = load_params(params_path)?;
    let entries: Vec<RosterEntry<'_>> = params
        .roster()
        .iter()
        .enumerate()
        .map(|(index, actor)| RosterEntry {
            index,
            name: &actor.name,
            actor_class: &actor.actor_class,
            implementation: &actor.implementation,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No actors in {}", params_path.display());
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{:>3}  {}  [{}]  {}",
            entry.index, entry.name, entry.actor_class, entry.implementation
        );
    }

    Ok(())
}
