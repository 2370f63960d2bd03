//! Interactive shell for exploring completions
//!
//! This module provides a small line-editor driven shell with:
//! - Grammar-driven tab completion through a selection menu
//! - A prompt that follows the currently matched tool
//! - Highlighting of recognized tool names and option flags
//! - Persistent command history
//!
//! Submitted lines are answered with the full suggestion list for that
//! line, rendered through the configured output format. A handful of
//! `:`-prefixed shell commands expose the grammar catalog.

mod completer;
mod highlighter;
mod prompt;

pub use completer::PredictCompleter;
pub use highlighter::LineHighlighter;
pub use prompt::PredictPrompt;

use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::engine::Predictor;
use crate::error::Result;
use crate::formatter::{SuggestionFormatter, format_tool_catalog};
use crate::grammar::GrammarRegistry;

/// Shell meta command, distinguished from ordinary completion input
enum ShellCommand {
    /// Leave the shell
    Quit,
    /// List tools with a loaded grammar
    Tools,
    /// Show shell usage
    Help,
}

/// Run the interactive shell until the user exits
///
/// # Arguments
/// * `config` - Application configuration
///
/// # Returns
/// * `Result<()>` - Ok when the shell exits normally, error on setup failure
pub fn run_shell(config: &Config) -> Result<()> {
    let registry = Arc::new(GrammarRegistry::from_config(&config.grammars));
    let predictor = Arc::new(Predictor::new(registry.clone()));
    let formatter = SuggestionFormatter::from_config(&config.display);

    let mut line_editor = create_editor(&predictor, &registry, config)?;
    let prompt = PredictPrompt::new(predictor.clone());

    println!(
        "predictext {} - interactive completion explorer",
        env!("CARGO_PKG_VERSION")
    );
    println!("Type a partial command line to see its suggestions, ':help' for shell commands\n");

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                if line.trim().is_empty() {
                    continue;
                }

                match parse_shell_command(&line) {
                    Some(ShellCommand::Quit) => break,
                    Some(ShellCommand::Tools) => {
                        println!("{}", format_tool_catalog(&registry.tools()));
                    }
                    Some(ShellCommand::Help) => print_help(),
                    None => {
                        // Trailing whitespace is significant: "conda " asks
                        // for subcommands while "conda" completes the tool
                        // word itself, so the line is passed through as-is.
                        let suggestions = predictor.suggest(&line, &CancellationToken::new());
                        match formatter.format(&suggestions) {
                            Ok(rendered) => println!("{rendered}"),
                            Err(err) => eprintln!("Error: {err}"),
                        }
                    }
                }
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
            }
            Ok(Signal::CtrlD) => break,
            Err(err) => {
                eprintln!("Input error: {err}");
                break;
            }
        }
    }

    Ok(())
}

/// Assemble the line editor with completion menu, highlighting and history
fn create_editor(
    predictor: &Arc<Predictor>,
    registry: &Arc<GrammarRegistry>,
    config: &Config,
) -> Result<Reedline> {
    let completer = Box::new(PredictCompleter::new(predictor.clone()));
    let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );

    let highlighter = Box::new(LineHighlighter::new(
        registry.clone(),
        config.display.color_output,
    ));

    let mut line_editor = Reedline::create()
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(Box::new(Emacs::new(keybindings)))
        .with_highlighter(highlighter);

    if config.history.persist {
        let history = FileBackedHistory::with_file(
            config.history.max_size,
            config.history.file_path.clone(),
        )
        .map_err(|e| format!("failed to open history file: {e}"))?;
        line_editor = line_editor.with_history(Box::new(history));
    }

    Ok(line_editor)
}

/// Recognize shell meta commands
///
/// # Arguments
/// * `input` - Raw input line
///
/// # Returns
/// * `Option<ShellCommand>` - The command, or None for completion input
fn parse_shell_command(input: &str) -> Option<ShellCommand> {
    match input.trim() {
        "exit" | "quit" => Some(ShellCommand::Quit),
        ":tools" => Some(ShellCommand::Tools),
        ":help" | ":h" => Some(ShellCommand::Help),
        _ => None,
    }
}

fn print_help() {
    println!("Shell commands:");
    println!("  :tools       list tools with a loaded grammar");
    println!("  :help        show this help");
    println!("  exit, quit   leave the shell");
    println!();
    println!("Any other input is treated as a partial command line and");
    println!("answered with the suggestions that would complete it.");
}
