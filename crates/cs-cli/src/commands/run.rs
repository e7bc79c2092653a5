use std::path::Path;

use colored::Colorize;
use tokio_util::sync::CancellationToken;

use cs_session::{ActivityLog, LogEntry, Notice, SessionConfig, SessionError, SessionRunner};

pub async fn run(path: &Path, pace_ms: u64, export: Option<&str>) -> Result<(), String> {
    let format = export.map(ExportFormat::parse).transpose()?;
    let mut campaign = super::load_campaign(path)?;

    let config = SessionConfig::default().with_pace_millis(pace_ms);
    let runner = SessionRunner::new(config);

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, stopping after the current call");
                cancel.cancel();
            }
        })
    };

    if !campaign.queue().is_empty() {
        println!(
            "  {} automated session ({} calls, {}ms pace)",
            "Starting".bold(),
            campaign.queue().len(),
            runner.config().pace.as_millis()
        );
    }

    let mut log = ActivityLog::new();
    let mut sink = |notice: Notice| {
        let entry = LogEntry::now(notice);
        super::print_entry(&entry);
        log.append(entry);
    };
    let result = runner.run(&mut campaign, &mut sink, &cancel).await;
    interrupt.abort();

    let report = match result {
        Ok(report) => report,
        // Already reported through the notice stream.
        Err(SessionError::QueueEmpty) => return Ok(()),
        Err(e) => return Err(e.to_string()),
    };

    println!();
    println!(
        "  {} of {} calls completed, {} left in queue",
        report.completed.len(),
        report.total,
        campaign.queue().len()
    );

    match format {
        Some(ExportFormat::Text) => print!("\n{}", log.export_text()),
        Some(ExportFormat::Markdown) => print!("\n{}", log.export_markdown()),
        None => {}
    }

    Ok(())
}

enum ExportFormat {
    Text,
    Markdown,
}

impl ExportFormat {
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown format '{other}', use: text, markdown")),
        }
    }
}
