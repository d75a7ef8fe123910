//! gwara CLI: a terminal quiz on the Greater Poland dialect.

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::QuizArgs;

#[derive(Parser)]
#[command(
    name = "gwara",
    version,
    about = "Quiz o gwarze wielkopolskiej (Greater Poland dialect quiz)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz in the terminal
    Play {
        #[command(flatten)]
        quiz: QuizArgs,
    },

    /// Fetch and print shuffled questions without playing
    Fetch {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter gwara.toml
    Init,
}

const DEFAULT_LOG_FILTER: &str = "gwara_core=info,gwara_providers=info,gwara_cli=info";

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { quiz } => commands::play::execute(quiz).await,
        Commands::Fetch { quiz, format } => commands::fetch::execute(quiz, format).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
