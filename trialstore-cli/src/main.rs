//! # trialstore CLI
//!
//! Command-line interface for projecting recorded trial samples.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trialstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "trialstore.yml", env = "TRIALSTORE_CONFIG")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the samples of a trial through actor and field filters
    Project {
        /// Trial parameters (YAML) holding the actor roster
        #[arg(long)]
        params: PathBuf,

        /// Recorded samples, one JSON object per line
        #[arg(long)]
        samples: PathBuf,

        /// Trial to project (defaults to the trial of the first sample)
        #[arg(long)]
        trial: Option<String>,

        /// Keep actors with these names (comma separated)
        #[arg(long = "actor-name", value_delimiter = ',')]
        actor_names: Vec<String>,

        /// Keep actors of these classes (comma separated)
        #[arg(long = "actor-class", value_delimiter = ',')]
        actor_classes: Vec<String>,

        /// Keep actors with these implementations (comma separated)
        #[arg(long = "actor-impl", value_delimiter = ',')]
        actor_implementations: Vec<String>,

        /// Keep only these fields (comma separated)
        #[arg(long = "field", value_delimiter = ',')]
        fields: Vec<String>,

        /// Treat actor patterns as globs
        #[arg(long)]
        glob: bool,

        /// Pretty-print projected samples
        #[arg(long)]
        pretty: bool,

        /// Print a projection summary to stderr
        #[arg(long)]
        report: bool,
    },

    /// List the accepted field identifiers
    Fields,

    /// Show the actor roster of a trial
    Roster {
        /// Trial parameters (YAML)
        #[arg(long)]
        params: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries the samples
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Project {
            params,
            samples,
            trial,
            actor_names,
            actor_classes,
            actor_implementations,
            fields,
            glob,
            pretty,
            report,
        } => {
            let opts = commands::ProjectOptions {
                params,
                samples,
                trial,
                actor_names,
                actor_classes,
                actor_implementations,
                fields,
                glob,
                pretty,
                report,
            };
            commands::project_samples(&cli.config, opts)
        }
        Commands::Fields => commands::list_fields(),
        Commands::Roster { params, json } => commands::show_roster(&params, json),
    }
}
