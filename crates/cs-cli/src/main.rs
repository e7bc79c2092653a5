//! CLI frontend for the Callsheet campaign simulator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "callsheet",
    about = "Callsheet: queue and rehearse outbound call campaigns",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter campaign file
    Init {
        /// Path of the campaign file to create
        file: PathBuf,
    },

    /// Validate a campaign file
    Check {
        /// Campaign file (JSON)
        file: PathBuf,
    },

    /// List contacts, templates, and queued calls
    List {
        /// Campaign file (JSON)
        file: PathBuf,
    },

    /// Run every queued call in a campaign file
    Run {
        /// Campaign file (JSON)
        file: PathBuf,

        /// Pause after dialing and after each script, in milliseconds
        #[arg(short, long, default_value = "700")]
        pace_ms: u64,

        /// Print the session log afterwards: text, markdown
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Build and run a campaign interactively
    Console {
        /// Pause after dialing and after each script, in milliseconds
        #[arg(short, long, default_value = "700")]
        pace_ms: u64,

        /// Start from a campaign file instead of an empty campaign
        #[arg(short, long)]
        from: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { file } => commands::init::run(&file),
        Commands::Check { file } => commands::check::run(&file),
        Commands::List { file } => commands::list::run(&file),
        Commands::Run {
            file,
            pace_ms,
            export,
        } => commands::run::run(&file, pace_ms, export.as_deref()).await,
        Commands::Console { pace_ms, from } => {
            commands::console::run(pace_ms, from.as_deref()).await
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
