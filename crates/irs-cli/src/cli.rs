use crate::config::models::EngineKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "IRS Screen - generate inhibitory RNA strand candidates for a target RNA and rank them by predicted strand-displacement behavior against a reporter switch.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate, evaluate and rank IRS candidates for a target RNA.
    Screen(ScreenArgs),
    /// Print the inhibition-strand candidate pool without evaluating it.
    Generate(GenerateArgs),
}

/// Options shared by every command that builds a candidate pool.
#[derive(Args, Debug, Clone, Default)]
pub struct DesignArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for the random filler of the middle region. Omit for a fresh pool every run.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S design.middle-length=12
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `screen` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ScreenArgs {
    // --- Core Arguments ---
    /// Target RNA sequence (A, U, C, G).
    #[arg(short, long, value_name = "RNA")]
    pub target: Option<String>,

    /// Path for the CSV export of all ranked results.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip the CSV export.
    #[arg(long, conflicts_with = "output")]
    pub no_export: bool,

    /// Number of top-ranked results to print. Defaults to all.
    #[arg(short = 'n', long, value_name = "INT")]
    pub top_n: Option<usize>,

    #[command(flatten)]
    pub design: DesignArgs,

    // --- Model Overrides ---
    /// Override the model temperature in degrees Celsius.
    #[arg(short = 'T', long, value_name = "CELSIUS")]
    pub temperature: Option<f64>,

    // --- Oracle Overrides ---
    /// Thermodynamics engine used to estimate binding free energies.
    #[arg(short, long, value_enum, value_name = "ENGINE")]
    pub engine: Option<EngineKind>,

    /// Path to the RNAcofold executable (used with `--engine rnacofold`).
    #[arg(long, value_name = "PATH")]
    pub rnacofold_bin: Option<PathBuf>,

    /// Abort the run if a single free-energy evaluation takes longer than this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub call_timeout: Option<f64>,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub design: DesignArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_arguments_parse() {
        let cli = Cli::parse_from([
            "irsscreen",
            "-vv",
            "screen",
            "--target",
            "GAUACUCC",
            "-T",
            "31",
            "--seed",
            "7",
            "-S",
            "design.middle-length=12",
            "--engine",
            "rnacofold",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Screen(args) = cli.command else {
            panic!("Expected 'screen' subcommand");
        };
        assert_eq!(args.target.as_deref(), Some("GAUACUCC"));
        assert_eq!(args.temperature, Some(31.0));
        assert_eq!(args.design.seed, Some(7));
        assert_eq!(args.design.set_values, vec!["design.middle-length=12"]);
        assert_eq!(args.engine, Some(EngineKind::Rnacofold));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["irsscreen", "-q", "-v", "generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn output_conflicts_with_no_export() {
        let result = Cli::try_parse_from([
            "irsscreen",
            "screen",
            "-t",
            "ACGU",
            "-o",
            "out.csv",
            "--no-export",
        ]);
        assert!(result.is_err());
    }
}
