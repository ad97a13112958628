mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use debrief::config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "debrief", version, about = "Meeting transcript extraction and grounded Q&A")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a transcript, save it, then answer questions about it
    Run {
        /// Path to the transcript text file
        transcript: PathBuf,
    },
    /// Extract title, summary, decisions, and action items from a transcript
    Extract {
        /// Path to the transcript text file
        transcript: PathBuf,
        /// Print the record without saving the meeting
        #[arg(long)]
        no_save: bool,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask questions about a saved meeting
    Ask(AskArgs),
    /// List saved meetings
    List,
    /// Show a saved meeting and its extracted record
    Show {
        /// Meeting id
        id: i64,
    },
    /// Check database health and configuration
    Doctor,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct AskArgs {
    /// Meeting id
    id: Option<i64>,
    /// Use the most recently saved meeting with this title
    #[arg(long)]
    title: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::DebriefConfig::load()?;

    // Log to stderr so stdout stays clean for answers and JSON output.
    let filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Run { transcript } => cli::run::run(&config, &transcript).await?,
        Command::Extract {
            transcript,
            no_save,
            json,
        } => cli::extract::extract(&config, &transcript, !no_save, json).await?,
        Command::Ask(args) => {
            let target = match (args.id, args.title) {
                (Some(id), _) => cli::ask::Target::Id(id),
                (None, Some(title)) => cli::ask::Target::Title(title),
                (None, None) => anyhow::bail!("pass a meeting id or --title"),
            };
            cli::ask::ask(&config, target).await?
        }
        Command::List => cli::list::list(&config)?,
        Command::Show { id } => cli::show::show(&config, id)?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
