//! List and profiles commands - show what is registered

use super::profile_registry;
use anyhow::Result;
use distill::config::ProjectConfig;
use distill::profiles::Profile;
use distill::scorers::ScorerRegistry;
use serde_json::json;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Run the list command
pub fn scorers(format: &str) -> Result<()> {
    let registry = ScorerRegistry::with_builtin();
    let scorers = registry.create_all();

    if format == "json" {
        let items: Vec<_> = scorers
            .iter()
            .map(|s| {
                json!({
                    "name": s.name(),
                    "description": s.description(),
                    "default_weight": s.default_weight(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!("\n{BOLD}Scorers{RESET} ({})\n", scorers.len());
    for s in &scorers {
        println!(
            "  {:<12} {DIM}w={:<4}{RESET} {}",
            s.name(),
            s.default_weight(),
            s.description()
        );
    }
    println!();
    Ok(())
}

/// Run the profiles command
pub fn profiles(config: &ProjectConfig, format: &str) -> Result<()> {
    let registry = profile_registry(config)?;
    let profiles = registry
        .names()
        .iter()
        .map(|name| registry.get(name))
        .collect::<Result<Vec<_>, _>>()?;

    if format == "json" {
        let items: Vec<&Profile> = profiles.iter().map(|p| p.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!("\n{BOLD}Profiles{RESET} ({})\n", profiles.len());
    for p in &profiles {
        println!("  {BOLD}{}{RESET}  {}", p.name, p.description);
        let weights: Vec<String> = p
            .weights
            .iter()
            .map(|(scorer, weight)| format!("{scorer}={weight}"))
            .collect();
        println!("  {DIM}{}{RESET}", weights.join("  "));
    }
    println!();
    Ok(())
}
