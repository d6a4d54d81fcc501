mod chunker;
mod cli;
mod config;
mod db;
mod embedding;
mod engine;
mod error;
mod retrieval;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mnema", version, about = "Conversational semantic memory engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Persist a message's content into memory
    Remember {
        /// Owning user ID
        #[arg(long)]
        user: String,
        /// Conversation session ID
        #[arg(long)]
        session: String,
        /// Source message ID
        #[arg(long)]
        message_id: String,
        /// Message content to chunk and embed
        content: String,
    },
    /// Retrieve ranked context for a query
    Recall {
        /// Owning user ID
        #[arg(long)]
        user: String,
        /// Maximum results to return
        #[arg(long)]
        limit: Option<usize>,
        /// Query text
        query: String,
    },
    /// Delete all chunks from a session
    ForgetSession {
        /// Session ID to forget
        session: String,
    },
    /// Show store statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::MnemaConfig::load()?;

    // Log to stderr so stdout stays clean for command output
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Remember {
            user,
            session,
            message_id,
            content,
        } => cli::remember::remember(&config, &user, &session, &message_id, &content)?,
        Command::Recall { user, limit, query } => {
            cli::recall::recall(&config, &user, &query, limit)?
        }
        Command::ForgetSession { session } => cli::forget::forget_session(&config, &session)?,
        Command::Stats => cli::stats::stats(&config)?,
    }

    Ok(())
}
