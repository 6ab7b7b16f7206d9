//! redsheet: terminal study aid with red-sheet masking
//!
//! Browse a deck of study topics and drill them with memory spans hidden
//! behind blocks until revealed.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use redsheet::{cli, ViewerConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with deck format info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nDeck format:",
        "\n  JSON array of topic records: id, title, category (optional), content",
        "\n  Memory spans: <span class=\"span-memory\">...</span>",
        "\n\nDisplay modes:",
        "\n  mask    - memory spans hidden until individually revealed",
        "\n  stealth - whole-screen monochrome disguise"
    )
}

#[derive(Parser)]
#[command(name = "redsheet")]
#[command(version, long_version = build_long_version())]
#[command(about = "Terminal study aid with red-sheet masking", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Deck validation found issues
    2  Deck could not be loaded

EXAMPLES:
    # Browse a deck
    redsheet view topics.json

    # Jump straight to a topic
    redsheet view topics.json --route topic/equity-theory

    # Check a deck in CI
    redsheet validate topics.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Path to the deck JSON file
    deck: PathBuf,

    /// Initial route fragment ("" = list, "topic/<id>" = detail)
    #[arg(long, default_value = "", env = "REDSHEET_ROUTE")]
    route: String,
}

/// Arguments for the `list` subcommand
#[derive(Parser)]
struct ListArgs {
    /// Path to the deck JSON file
    deck: PathBuf,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Path to the deck JSON file
    deck: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a deck interactively
    View(ViewArgs),

    /// Print the topic list
    List(ListArgs),

    /// Check a deck for invariant violations
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Dispatch to command handlers
    let exit_code = match cli.command {
        Commands::View(args) => {
            let config = ViewerConfig::new(args.deck).with_route(args.route);
            cli::run_view(config)?
        }

        Commands::List(args) => cli::run_list(&args.deck)?,

        Commands::Validate(args) => cli::run_validate(&args.deck)?,

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "redsheet", &mut io::stdout());
            cli::exit_codes::SUCCESS
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
