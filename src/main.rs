//! predictext - grammar-driven completion suggestions for command line tools
//!
//! Suggests the next argument for tools like conda from declarative syntax
//! definitions, either as a one-shot lookup for shell integration or in an
//! interactive try-out shell.
//!
//! # Features
//!
//! - Tab-expansion suggestions for subcommands, options, and parameter values
//! - Tool grammars loaded from TOML files, with bundled definitions built in
//! - Interactive shell with completion menu and syntax highlighting
//! - Shell integration scripts for bash, zsh, and fish
//! - Multiple output formats (text, JSON, table)
//! - Configuration management
//!
//! # Usage
//!
//! ```bash
//! # One-shot suggestions
//! predictext "conda env "
//!
//! # Interactive mode
//! predictext
//! ```

use tracing::Level;

mod cli;
mod config;
mod engine;
mod error;
mod formatter;
mod grammar;
mod repl;
mod utils;

use cli::CliInterface;
use error::Result;

/// Application entry point
#[tokio::main]
async fn main() {
    // Initialize the application and handle any errors
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start main application
///
/// # Returns
/// * `Result<()>` - Success or error
async fn run() -> Result<()> {
    // Parse command-line arguments and load configuration
    let cli = CliInterface::new()?;

    // Initialize logging based on verbosity
    initialize_logging(&cli);

    // Handle subcommands (complete, tools, check, init, config, version)
    if cli.handle_subcommand().await? {
        return Ok(());
    }

    // A bare LINE argument is shorthand for the complete subcommand
    if let Some(line) = cli.args().line.clone() {
        return cli.complete_line(&line, false).await;
    }

    // Run in interactive mode
    repl::run_shell(cli.config())
}

/// Initialize logging system based on verbosity level
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    // Build subscriber with level filter
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    // Configure timestamps
    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
