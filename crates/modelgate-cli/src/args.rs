//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modelgate")]
#[command(about = "Relay model answers as server-sent events with token accounting")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (default: ./modelgate.json, then the user config dir)
    #[arg(long, global = true, env = "MODELGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question and stream the answer as SSE frames
    Query {
        question: String,

        /// Provider name from the configuration
        #[arg(long, short)]
        provider: Option<String>,

        /// Print token usage as JSON to stderr when done
        #[arg(long)]
        usage: bool,
    },

    /// Embed text with the configured embedding provider
    Embed { text: String },

    /// Connect configured tool servers and list the merged tools
    Tools,

    /// Show the pricing note of a provider
    Pricing {
        #[arg(long, short)]
        provider: Option<String>,

        /// Show the embedding provider instead
        #[arg(long, conflicts_with = "provider")]
        embedding: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query() {
        let cli = Cli::try_parse_from(["modelgate", "query", "-p", "local", "--usage", "hi"]).unwrap();
        match cli.command {
            Commands::Query {
                question,
                provider,
                usage,
            } => {
                assert_eq!(question, "hi");
                assert_eq!(provider.as_deref(), Some("local"));
                assert!(usage);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["modelgate", "tools", "--config", "/tmp/gate.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/gate.json")));
    }
}
