use clap::Parser;
use std::path::PathBuf;

use marvel_explorer::cli::{CliHandler, Commands};
use marvel_explorer::version::CURRENT_VERSION;

#[derive(Parser)]
#[command(
    name = "marvel-explorer",
    about = "Browse, search and inspect Marvel characters from the terminal",
    long_about = "Marvel Explorer - terminal client for the public Marvel character catalog

OVERVIEW:
  Fetches characters from the Marvel API, lets you search, filter and sort
  them locally, and shows each character in detail with images and links.

QUICK START:
  marvel-explorer config set-keys <PUBLIC> <PRIVATE>   # Store your API keys
  marvel-explorer list --search spider                 # Search the first page
  marvel-explorer list --sort comics --order desc      # Most comics first
  marvel-explorer gallery --filter hasSeries           # Image gallery
  marvel-explorer show 1009610                         # One character
  marvel-explorer search Spi --browse                  # Prefix search, then step through
  marvel-explorer status                               # Check keys and API status",
    version = CURRENT_VERSION,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut handler = match CliHandler::new(cli.config) {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = if cli.verbose || handler.config().verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(format!("marvel_explorer={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = handler.execute(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
