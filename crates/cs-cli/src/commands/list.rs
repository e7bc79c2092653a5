use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use cs_core::Campaign;

pub fn run(path: &Path) -> Result<(), String> {
    let campaign = super::load_campaign(path)?;

    print_contacts(&campaign);
    print_templates(&campaign);
    print_queue(&campaign);

    Ok(())
}

fn print_contacts(campaign: &Campaign) {
    println!("  {}", "Contacts".bold().underline());
    if campaign.contacts().is_empty() {
        println!("  No contacts.");
        println!();
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Phone", "Company"]);
    for (i, contact) in campaign.contacts().iter().enumerate() {
        let company = if contact.has_company() {
            contact.company.clone()
        } else {
            "—".to_string()
        };
        table.add_row(vec![
            (i + 1).to_string(),
            contact.name.clone(),
            contact.phone.clone(),
            company,
        ]);
    }
    println!("{table}");
    println!();
}

fn print_templates(campaign: &Campaign) {
    println!("  {}", "Templates".bold().underline());
    if campaign.templates().is_empty() {
        println!("  No templates.");
        println!();
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Script"]);
    for (i, template) in campaign.templates().iter().enumerate() {
        let body = if template.body.chars().count() > 60 {
            let cut: String = template.body.chars().take(57).collect();
            format!("{cut}...")
        } else {
            template.body.clone()
        };
        table.add_row(vec![(i + 1).to_string(), template.name.clone(), body]);
    }
    println!("{table}");
    println!();
}

fn print_queue(campaign: &Campaign) {
    println!("  {}", "Queue".bold().underline());
    let lines = campaign.queue_lines();
    if lines.is_empty() {
        println!("  No calls queued.");
        return;
    }
    for line in &lines {
        println!("  {line}");
    }
    println!();
    println!("  {} calls", lines.len());
}
