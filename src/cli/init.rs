//! Shell integration script generation
//!
//! Each generated script contains two parts:
//! - Completion for the predictext binary itself (via clap_complete)
//! - A bridge that registers every tool with a loaded grammar, so the
//!   shell delegates tab completion for those tools to
//!   `predictext complete --bare`

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::Result;
use crate::grammar::GrammarRegistry;

/// Render the integration script for the given shell
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
/// * `registry` - Registry listing the tools to hook
///
/// # Returns
/// * `Result<String>` - The script, or an error for unsupported shells
pub fn integration_script(shell_name: &str, registry: &GrammarRegistry) -> Result<String> {
    let shell = parse_shell(shell_name)?;
    let tools = hooked_tools(registry);

    match shell {
        Shell::Bash => Ok(bash_script(&tools)),
        Shell::Zsh => Ok(zsh_script(&tools)),
        Shell::Fish => Ok(fish_script(&tools)),
        _ => Err("Unsupported shell. Supported shells: bash, zsh, fish".into()),
    }
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish",
            shell_name
        )
        .into()),
    }
}

/// Tool names and aliases worth hooking, sorted and deduplicated
fn hooked_tools(registry: &GrammarRegistry) -> Vec<String> {
    let mut names = Vec::new();
    for grammar in registry.tools() {
        names.push(grammar.name.clone());
        names.extend(grammar.aliases.iter().cloned());
    }
    names.sort();
    names.dedup();
    names
}

/// Completion script for the predictext binary itself
fn base_completion(shell: Shell) -> String {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, "predictext", &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn bash_script(tools: &[String]) -> String {
    let base = base_completion(Shell::Bash);
    let hooks = tools
        .iter()
        .map(|tool| format!("complete -F _predictext_bridge {tool}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"{base}
# Delegate tab completion for supported tools to predictext
_predictext_bridge() {{
    local line="${{COMP_LINE:0:$COMP_POINT}}"
    local suggestions
    suggestions=$(predictext complete --bare "$line" 2>/dev/null)
    COMPREPLY=($(compgen -W "$suggestions" -- "${{COMP_WORDS[COMP_CWORD]}}"))
}}

{hooks}
"#
    )
}

fn zsh_script(tools: &[String]) -> String {
    let base = base_completion(Shell::Zsh);
    let hooks = format!("compdef _predictext_bridge {}", tools.join(" "));

    format!(
        r#"{base}
# Delegate tab completion for supported tools to predictext
_predictext_bridge() {{
    local -a suggestions
    suggestions=(${{(f)"$(predictext complete --bare "$LBUFFER" 2>/dev/null)"}})
    (( ${{#suggestions}} )) && compadd -a suggestions
}}

{hooks}
"#
    )
}

fn fish_script(tools: &[String]) -> String {
    let base = base_completion(Shell::Fish);
    let hooks = tools
        .iter()
        .map(|tool| format!(r#"complete -c {tool} -f -a "(__predictext_bridge)""#))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"{base}
# Delegate tab completion for supported tools to predictext
function __predictext_bridge
    predictext complete --bare (commandline --cut-at-cursor --current-process) 2>/dev/null
end

{hooks}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell() {
        assert!(matches!(parse_shell("bash"), Ok(Shell::Bash)));
        assert!(matches!(parse_shell("zsh"), Ok(Shell::Zsh)));
        assert!(matches!(parse_shell("fish"), Ok(Shell::Fish)));
        assert!(parse_shell("invalid").is_err());
    }

    #[test]
    fn test_parse_shell_case_insensitive() {
        assert!(matches!(parse_shell("BASH"), Ok(Shell::Bash)));
        assert!(matches!(parse_shell("Zsh"), Ok(Shell::Zsh)));
        assert!(matches!(parse_shell("FiSh"), Ok(Shell::Fish)));
    }

    #[test]
    fn test_hooked_tools_include_aliases() {
        let registry = GrammarRegistry::bundled();
        let tools = hooked_tools(&registry);
        assert!(tools.contains(&"conda".to_string()));
        assert!(tools.contains(&"mamba".to_string()));
    }

    #[test]
    fn test_bash_script_registers_tools() {
        let registry = GrammarRegistry::bundled();
        let script = integration_script("bash", &registry).unwrap();
        assert!(script.contains("_predictext_bridge"));
        assert!(script.contains("complete -F _predictext_bridge conda"));
        assert!(script.contains("complete -F _predictext_bridge mamba"));
    }

    #[test]
    fn test_zsh_script_registers_tools() {
        let registry = GrammarRegistry::bundled();
        let script = integration_script("zsh", &registry).unwrap();
        assert!(script.contains("compdef _predictext_bridge conda mamba"));
    }

    #[test]
    fn test_fish_script_registers_tools() {
        let registry = GrammarRegistry::bundled();
        let script = integration_script("fish", &registry).unwrap();
        assert!(script.contains(r#"complete -c conda -f -a "(__predictext_bridge)""#));
        assert!(script.contains("commandline --cut-at-cursor"));
    }

    #[test]
    fn test_unsupported_shell_rejected() {
        let registry = GrammarRegistry::bundled();
        assert!(integration_script("powershell", &registry).is_err());
    }
}
