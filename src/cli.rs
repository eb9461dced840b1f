use clap::{Args as ClapArgs, Parser, Subcommand};
use license_audit::application::dto::OutputFormat;
use std::path::PathBuf;

/// Validate dependency licenses against an allow-list and report on them
#[derive(Parser, Debug)]
#[command(name = "license-audit")]
#[command(version)]
#[command(
    about = "Validate dependency licenses against an allow-list and report on them",
    long_about = None
)]
pub struct Args {
    /// Log filter (e.g. info, debug, license_audit=trace)
    #[arg(long, global = true, default_value = "info", value_name = "FILTER")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate every dependency license and persist the results
    Validate(ValidateArgs),
    /// Generate the license report from persisted results
    Report(ReportArgs),
}

/// Options shared by both passes
#[derive(ClapArgs, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Config file (defaults to license-audit.config.yml in the project directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Resolved dependency graph manifest
    #[arg(long, value_name = "FILE")]
    pub graph_file: Option<PathBuf>,

    /// Directory holding the validation results
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Leave optional dependencies out of the tree
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub skip_optionals: Option<bool>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Approved license name; can be given several times: -l MIT -l Apache-2.0
    #[arg(short = 'l', long = "valid-license", value_name = "NAME")]
    pub valid_licenses: Vec<String>,

    /// Stop at the first invalid license
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub fail_fast: Option<bool>,

    /// Walk transitive dependencies (default true)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub recursive: Option<bool>,

    /// Accept test-scope dependencies without checking their licenses
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub skip_test_scope: Option<bool>,

    /// Leave provided-scope dependencies out of the tree
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub skip_provided_scope: Option<bool>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory for the report, or '-' for stdout
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Output format: markdown or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
