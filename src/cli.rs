use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ncdrecon")]
#[command(about = "Reconciliation and realism validation for NCD screening count records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .ncdrecon.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the baseline record from an adjusted record and its adjustments
    Reconcile {
        /// Adjusted (current) record file
        adjusted: PathBuf,

        /// Adjustments record file; omitted means no adjustments were made
        #[arg(short, long)]
        adjustments: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit non-zero when any baseline cell goes negative
        #[arg(long)]
        strict: bool,
    },

    /// Compute the before/after delta between two records
    Diff {
        /// Baseline record file
        baseline: PathBuf,

        /// Proposed record file
        proposed: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit non-zero when the records are identical (no-op save gate)
        #[arg(long = "deny-empty")]
        deny_empty: bool,
    },

    /// Check a record for counts that cannot describe a real population
    Validate {
        /// Record file to check
        record: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit non-zero when any issue is found
        #[arg(long)]
        strict: bool,
    },

    /// Initialize a configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reconcile_command() {
        let cli = Cli::parse_from([
            "ncdrecon",
            "reconcile",
            "adjusted.json",
            "--adjustments",
            "deltas.json",
            "--format",
            "json",
            "--strict",
        ]);

        match cli.command {
            Commands::Reconcile {
                adjusted,
                adjustments,
                format,
                strict,
                ..
            } => {
                assert_eq!(adjusted, PathBuf::from("adjusted.json"));
                assert_eq!(adjustments, Some(PathBuf::from("deltas.json")));
                assert_eq!(format, OutputFormat::Json);
                assert!(strict);
            }
            _ => panic!("Expected Reconcile command"),
        }
    }

    #[test]
    fn parses_diff_command_with_deny_empty() {
        let cli = Cli::parse_from([
            "ncdrecon",
            "diff",
            "baseline.json",
            "proposed.json",
            "--deny-empty",
        ]);

        match cli.command {
            Commands::Diff {
                baseline,
                proposed,
                deny_empty,
                format,
                ..
            } => {
                assert_eq!(baseline, PathBuf::from("baseline.json"));
                assert_eq!(proposed, PathBuf::from("proposed.json"));
                assert!(deny_empty);
                assert_eq!(format, OutputFormat::Terminal);
            }
            _ => panic!("Expected Diff command"),
        }
    }

    #[test]
    fn parses_global_config_flag() {
        let cli = Cli::parse_from([
            "ncdrecon",
            "validate",
            "record.json",
            "--config",
            "site.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
    }

    #[test]
    fn parses_init_command() {
        let cli = Cli::parse_from(["ncdrecon", "init", "--force"]);
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn output_format_converts() {
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Json),
            crate::io::output::OutputFormat::Json
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Markdown),
            crate::io::output::OutputFormat::Markdown
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Terminal),
            crate::io::output::OutputFormat::Terminal
        );
    }
}
