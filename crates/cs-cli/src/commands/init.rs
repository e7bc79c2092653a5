use std::fs;
use std::path::Path;

use cs_core::Blueprint;

pub fn run(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()));
    }

    let mut content = serde_json::to_string_pretty(&Blueprint::sample())
        .map_err(|e| format!("cannot serialize campaign: {e}"))?;
    content.push('\n');

    fs::write(path, content).map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("Created campaign '{}'", path.display());
    println!("  2 contacts, 2 templates, 2 queued calls");
    println!();
    println!("Get started:");
    println!("  callsheet list {}        # Show what is queued", path.display());
    println!("  callsheet run {}         # Run the session", path.display());
    println!("  callsheet console --from {} # Keep editing interactively", path.display());

    Ok(())
}
