//! Command-line interface for parley
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Live speech interpreter
#[derive(Parser, Debug)]
#[command(name = "parley", version, about = "Live speech interpreter")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Spoken language (BCP-47, e.g. ja-JP)
    #[arg(long, value_name = "LANG")]
    pub source_language: Option<String>,

    /// Translation target language (short tag, e.g. en)
    #[arg(long, value_name = "LANG")]
    pub target_language: Option<String>,

    /// Synthesis voice name
    #[arg(long, value_name = "VOICE")]
    pub voice: Option<String>,

    /// Spoken phrase that ends the session (empty string disables it)
    #[arg(long, value_name = "PHRASE")]
    pub termination_phrase: Option<String>,

    /// Service region (e.g. japaneast)
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_command() {
        let cli = Cli::try_parse_from(["parley"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.quiet);
        assert!(cli.source_language.is_none());
        assert!(cli.target_language.is_none());
        assert!(cli.voice.is_none());
        assert!(cli.termination_phrase.is_none());
        assert!(cli.region.is_none());
    }

    #[test]
    fn test_parse_with_options() {
        let cli = Cli::try_parse_from([
            "parley",
            "--source-language",
            "ja-JP",
            "--target-language",
            "en",
            "--region",
            "japaneast",
        ])
        .unwrap();

        assert_eq!(cli.source_language.as_deref(), Some("ja-JP"));
        assert_eq!(cli.target_language.as_deref(), Some("en"));
        assert_eq!(cli.region.as_deref(), Some("japaneast"));
        assert!(cli.voice.is_none());
    }

    #[test]
    fn test_parse_global_config() {
        let cli = Cli::try_parse_from(["parley", "--config", "/path/to/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_global_quiet() {
        let cli = Cli::try_parse_from(["parley", "--quiet", "config"]).unwrap();
        assert!(cli.quiet);
        match cli.command {
            Some(Commands::Config) => {}
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_parse_quiet_short_flag() {
        let cli = Cli::try_parse_from(["parley", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_termination_phrase() {
        let cli = Cli::try_parse_from(["parley", "--termination-phrase", "終わり"]).unwrap();
        assert_eq!(cli.termination_phrase.as_deref(), Some("終わり"));
    }

    #[test]
    fn test_parse_empty_termination_phrase() {
        let cli = Cli::try_parse_from(["parley", "--termination-phrase", ""]).unwrap();
        assert_eq!(cli.termination_phrase.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_voice() {
        let cli = Cli::try_parse_from(["parley", "--voice", "en-US-BenjaminRUS"]).unwrap();
        assert_eq!(cli.voice.as_deref(), Some("en-US-BenjaminRUS"));
    }

    #[test]
    fn test_invalid_command_returns_error() {
        let result = Cli::try_parse_from(["parley", "invalid"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_help_flag() {
        // Clap returns an error for --help but with DisplayHelp kind
        let result = Cli::try_parse_from(["parley", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        // Clap returns an error for --version but with DisplayVersion kind
        let result = Cli::try_parse_from(["parley", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_global_options_after_command() {
        // Global options should work before or after the command
        let cli =
            Cli::try_parse_from(["parley", "config", "--config", "/tmp/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["parley", "completions", "bash"]).unwrap();
        match cli.command {
            Some(Commands::Completions { shell }) => {
                assert_eq!(shell, Shell::Bash);
            }
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_completions_requires_shell() {
        let result = Cli::try_parse_from(["parley", "completions"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
