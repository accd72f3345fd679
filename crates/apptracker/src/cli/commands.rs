//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Add command arguments.
///
/// Fields stay as raw text here; parsing and validation happen before the
/// record is built so bad input never reaches the store.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// College name
    pub college: String,

    /// Mailing address
    #[arg(short, long, default_value = "")]
    pub address: String,

    /// Date applied (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub applied: Option<String>,

    /// Application fee (blank means 0)
    #[arg(long)]
    pub cost: Option<String>,

    /// Submission platform, e.g. CommonApp
    #[arg(short, long, default_value = "")]
    pub platform: String,

    /// Expected decision date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub decision: Option<String>,

    /// The essay is written
    #[arg(long)]
    pub essay: bool,

    /// Transcripts have been sent
    #[arg(long)]
    pub transcripts: bool,

    /// Recommender as NAME|EMAIL|REQUESTED|DUE (repeatable)
    #[arg(short, long = "recommender", value_name = "SPEC")]
    pub recommenders: Vec<String>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Part of the college name, any case
    pub query: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Exact college name, any case
    pub name: String,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            college: "Tufts".to_string(),
            address: String::new(),
            applied: None,
            cost: Some("75".to_string()),
            platform: "CommonApp".to_string(),
            decision: None,
            essay: false,
            transcripts: true,
            recommenders: Vec::new(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Tufts"));
        assert!(debug_str.contains("CommonApp"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
