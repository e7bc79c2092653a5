use std::path::Path;

use colored::Colorize;

use cs_core::unknown_placeholders;

pub fn run(path: &Path) -> Result<(), String> {
    let blueprint = super::load_blueprint(path)?;
    let campaign = blueprint
        .build()
        .map_err(|e| format!("{}: {e}", path.display()))?;

    let mut warnings = 0;
    for template in campaign.templates() {
        for token in unknown_placeholders(&template.body) {
            warnings += 1;
            eprintln!(
                "  {} template '{}' uses unknown placeholder {token}",
                "warning:".yellow().bold(),
                template.name
            );
        }
    }

    if warnings > 0 {
        println!(
            "  All checks passed for '{}' ({} warning{}).",
            path.display(),
            warnings,
            if warnings == 1 { "" } else { "s" }
        );
    } else {
        println!("  All checks passed for '{}'.", path.display());
    }
    println!(
        "  {} contacts, {} templates, {} queued calls",
        campaign.contacts().len(),
        campaign.templates().len(),
        campaign.queue().len()
    );

    Ok(())
}
