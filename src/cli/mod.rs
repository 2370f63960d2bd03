//! Command-line interface for predictext
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Subcommand dispatch (complete, tools, check, init, config)
//! - Mode selection (one-shot completion vs interactive shell)

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::{Config, OutputFormat};
use crate::engine::Predictor;
use crate::error::Result;
use crate::formatter::{SuggestionFormatter, format_tool_catalog};
use crate::grammar::{GrammarRegistry, parse_grammar_str};

pub mod init;

/// Grammar-driven completion for command line tools
#[derive(Parser, Debug)]
#[command(
    name = "predictext",
    version,
    about = "Completion suggestions for popular command line tools",
    long_about = "Grammar-driven tab-expansion of arguments for popular command line tools.
Suggestions come from declarative syntax definitions, so new tools can be
supported by dropping a TOML file into the grammar directory."
)]
pub struct CliArgs {
    /// Partial command line to complete
    ///
    /// Shorthand for the `complete` subcommand. When omitted and no
    /// subcommand is given, the interactive shell starts.
    #[arg(value_name = "LINE")]
    pub line: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Directory with additional grammar definitions
    #[arg(long, value_name = "DIR")]
    pub grammar_dir: Option<PathBuf>,

    /// Disable the grammar definitions compiled into the binary
    #[arg(long)]
    pub no_builtin: bool,

    /// Output format (text, json, table)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for predictext
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print suggestions for a partial command line
    Complete {
        /// The partial command line, quoted as one argument
        #[arg(value_name = "LINE")]
        line: String,

        /// Print bare suggestion texts only, one per line
        ///
        /// Intended for shell integration scripts.
        #[arg(long)]
        bare: bool,
    },

    /// List tools with a loaded grammar
    Tools,

    /// Validate a grammar definition file
    Check {
        /// Path to the grammar TOML file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell integration script
    Init {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show or manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,
    },

    /// Show version information
    Version,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let config_path = args.config_file.as_deref();
        let mut config = Config::load_from_file(config_path)?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        // Apply CLI arguments to override config values
        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    ///
    /// # Returns
    /// * `&Config` - Reference to configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    ///
    /// # Returns
    /// * `&CliArgs` - Reference to arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    ///
    /// # Arguments
    /// * `config` - Configuration to modify
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
        Self::apply_grammar_args(config, args);
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if let Some(format_str) = &args.format {
            config.display.format = Self::parse_output_format(format_str);
        }

        if args.no_color {
            config.display.color_output = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        use crate::config::LogLevel;

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Apply grammar-source CLI arguments to configuration
    fn apply_grammar_args(config: &mut Config, args: &CliArgs) {
        if let Some(dir) = &args.grammar_dir {
            config.grammars.directory = dir.clone();
        }

        if args.no_builtin {
            config.grammars.builtin = false;
        }
    }

    /// Parse output format string
    fn parse_output_format(format_str: &str) -> OutputFormat {
        match format_str.to_lowercase().as_str() {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => {
                eprintln!("Warning: Unknown format '{}', using default", format_str);
                OutputFormat::Text
            }
        }
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub async fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Complete { line, bare }) => {
                self.complete_line(line, *bare).await?;
                Ok(true)
            }
            Some(Commands::Tools) => {
                self.list_tools();
                Ok(true)
            }
            Some(Commands::Check { file }) => {
                self.check_grammar(file)?;
                Ok(true)
            }
            Some(Commands::Init { shell }) => {
                let registry = GrammarRegistry::from_config(&self.config.grammars);
                print!("{}", init::integration_script(shell, &registry)?);
                Ok(true)
            }
            Some(Commands::Config {
                show,
                validate,
                init,
            }) => {
                self.handle_config_command(*show, *validate, *init)?;
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Print suggestions for a partial command line
    ///
    /// # Arguments
    /// * `line` - The partial command line
    /// * `bare` - Print bare suggestion texts without formatting
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub async fn complete_line(&self, line: &str, bare: bool) -> Result<()> {
        let registry = Arc::new(GrammarRegistry::from_config(&self.config.grammars));
        let predictor = Predictor::new(registry);

        // Ctrl+C abandons the request instead of killing the process
        let cancel_token = CancellationToken::new();
        let cancel_token_clone = cancel_token.clone();
        let ctrl_c_handle = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    cancel_token_clone.cancel();
                }
                Err(err) => {
                    eprintln!("Failed to listen for Ctrl+C: {}", err);
                }
            }
        });

        let suggestions = predictor.suggest(line, &cancel_token);
        ctrl_c_handle.abort();

        if bare {
            for suggestion in &suggestions {
                println!("{}", suggestion.text);
            }
            return Ok(());
        }

        let formatter = SuggestionFormatter::from_config(&self.config.display);
        println!("{}", formatter.format(&suggestions)?);
        Ok(())
    }

    /// Print the catalog of tools with a loaded grammar
    fn list_tools(&self) {
        let registry = GrammarRegistry::from_config(&self.config.grammars);
        println!("{}", format_tool_catalog(&registry.tools()));
    }

    /// Validate a grammar definition file and report the outcome
    ///
    /// # Arguments
    /// * `file` - Path to the grammar TOML file
    ///
    /// # Returns
    /// * `Result<()>` - Ok for a valid file, error (nonzero exit) otherwise
    fn check_grammar(&self, file: &Path) -> Result<()> {
        println!("Checking grammar file: {}", file.display());

        if !file.exists() {
            println!("❌ File does not exist");
            return Err(format!("no such file: {}", file.display()).into());
        }

        let text = std::fs::read_to_string(file)?;
        match parse_grammar_str(&text, &file.display().to_string()) {
            Ok(grammar) => {
                println!(
                    "✅ Valid grammar for '{}' ({} subcommands, {} root options)",
                    grammar.name,
                    grammar.root.children.len(),
                    grammar.root.options.len()
                );
                Ok(())
            }
            Err(e) => {
                println!("❌ {}", e);
                Err("grammar file failed validation".into())
            }
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("predictext version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    /// * `init` - Whether to write a default configuration file
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    fn handle_config_command(&self, show: bool, validate: bool, init: bool) -> Result<()> {
        if init {
            self.init_config_file()?;
        }

        if validate {
            self.validate_config_file()?;
        }

        // Bare `config` defaults to showing
        if show || (!validate && !init) {
            self.show_config()?;
        }

        Ok(())
    }

    /// Write a default configuration file if none exists
    fn init_config_file(&self) -> Result<()> {
        let path = self.get_config_path();

        if path.exists() {
            println!("Configuration file already exists: {}", path.display());
            return Ok(());
        }

        Config::default().save(&path)?;
        println!("Created configuration file: {}", path.display());
        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return Ok(());
        }

        match Config::load_from_file(self.args.config_file.as_deref()) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {}", e),
            },
            Err(e) => println!("❌ Failed to load configuration: {}", e),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();

        match self.config.to_toml_with_comments() {
            Ok(toml_str) => println!("{}", toml_str),
            Err(e) => {
                eprintln!("Error formatting configuration: {}", e);
                println!("{:#?}", self.config);
            }
        }

        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .as_ref()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Config::default_config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_cli_args_parsing() {
        // Test with no arguments
        let args = CliArgs::try_parse_from(vec!["predictext"]).unwrap();
        assert!(args.line.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_with_line() {
        let args = CliArgs::try_parse_from(vec!["predictext", "conda in"]).unwrap();
        assert_eq!(args.line, Some("conda in".to_string()));
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from(vec!["predictext", "--no-color", "--quiet"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_args_complete_subcommand() {
        let args =
            CliArgs::try_parse_from(vec!["predictext", "complete", "conda ", "--bare"]).unwrap();
        match args.command {
            Some(Commands::Complete { line, bare }) => {
                assert_eq!(line, "conda ");
                assert!(bare);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_args_check_subcommand() {
        let args =
            CliArgs::try_parse_from(vec!["predictext", "check", "/tmp/conda.toml"]).unwrap();
        match args.command {
            Some(Commands::Check { file }) => {
                assert_eq!(file, PathBuf::from("/tmp/conda.toml"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_args_init_subcommand() {
        let args = CliArgs::try_parse_from(vec!["predictext", "init", "bash"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Init { shell }) if shell == "bash"
        ));
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(
            CliInterface::parse_output_format("text"),
            OutputFormat::Text
        );
        assert_eq!(
            CliInterface::parse_output_format("json"),
            OutputFormat::Json
        );
        assert_eq!(
            CliInterface::parse_output_format("TABLE"),
            OutputFormat::Table
        );
        assert_eq!(
            CliInterface::parse_output_format("unknown"),
            OutputFormat::Text
        );
    }

    #[test]
    fn test_apply_args_to_config() {
        let args = CliArgs::try_parse_from(vec![
            "predictext",
            "--format",
            "json",
            "--no-color",
            "--no-builtin",
            "--grammar-dir",
            "/tmp/grammars",
        ])
        .unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);

        assert_eq!(config.display.format, OutputFormat::Json);
        assert!(!config.display.color_output);
        assert!(!config.grammars.builtin);
        assert_eq!(config.grammars.directory, PathBuf::from("/tmp/grammars"));
    }

    #[test]
    fn test_apply_logging_args() {
        let args = CliArgs::try_parse_from(vec!["predictext", "--vv"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Trace);

        let args = CliArgs::try_parse_from(vec!["predictext", "--quiet"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    #[test]
    fn test_handle_subcommand_version() {
        let args = CliArgs::try_parse_from(vec!["predictext", "version"]).unwrap();
        let cli = CliInterface {
            args,
            config: Config::default(),
        };
        let handled = tokio_test::block_on(cli.handle_subcommand()).unwrap();
        assert!(handled);
    }

    #[test]
    fn test_handle_subcommand_none() {
        let args = CliArgs::try_parse_from(vec!["predictext", "conda "]).unwrap();
        let cli = CliInterface {
            args,
            config: Config::default(),
        };
        let handled = tokio_test::block_on(cli.handle_subcommand()).unwrap();
        assert!(!handled);
    }
}
