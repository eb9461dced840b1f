mod cli;
mod config;

use anyhow::Context;
use cli::{Args, Command, CommonArgs, ReportArgs, ValidateArgs};
use config::ConfigFile;
use license_audit::adapters::outbound::console::StderrProgressReporter;
use license_audit::adapters::outbound::filesystem::{
    FileSystemResultsStore, ManifestGraphProvider, GRAPH_MANIFEST_FILE_NAME,
};
use license_audit::application::dto::{OutputFormat, ReportRequest, ValidateRequest};
use license_audit::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use license_audit::application::use_cases::{GenerateReportUseCase, ValidateLicensesUseCase};
use license_audit::audit::domain::RunSettings;
use license_audit::ports::outbound::ProgressReporter;
use license_audit::shared::error::{AuditError, ExitCode};
use license_audit::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default location of results and report, relative to the project directory
const DEFAULT_OUTPUT_DIR: &str = "target/licenses";

fn main() {
    let args = Args::parse_args();
    init_tracing(&args.log_level);

    let exit_code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            ExitCode::for_error(&e)
        }
    };

    process::exit(exit_code.as_i32());
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    match args.command {
        Command::Validate(validate) => run_validate(validate),
        Command::Report(report) => run_report(report),
    }
}

/// Project directory, its configuration and the paths derived from both
struct Workspace {
    project_dir: PathBuf,
    config: ConfigFile,
}

impl Workspace {
    fn open(common: &CommonArgs) -> Result<Self> {
        let project_dir = common.path.clone().unwrap_or_else(|| PathBuf::from("."));
        validate_project_path(&project_dir)?;

        let config = match &common.config {
            Some(path) => config::load_config_from_path(path)?,
            None => config::discover_config(&project_dir)?.unwrap_or_default(),
        };

        Ok(Self {
            project_dir,
            config,
        })
    }

    /// Configured paths are relative to the project directory
    fn configured_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    fn graph_file(&self, common: &CommonArgs) -> PathBuf {
        common
            .graph_file
            .clone()
            .or_else(|| self.config.graph_file.as_deref().map(|p| self.configured_path(p)))
            .unwrap_or_else(|| self.project_dir.join(GRAPH_MANIFEST_FILE_NAME))
    }

    fn results_dir(&self, common: &CommonArgs) -> PathBuf {
        common
            .results_dir
            .clone()
            .or_else(|| self.config.results_dir.as_deref().map(|p| self.configured_path(p)))
            .unwrap_or_else(|| self.project_dir.join(DEFAULT_OUTPUT_DIR))
    }

    fn output_dir(&self, output: Option<&Path>) -> PathBuf {
        match output {
            Some(path) => path.to_path_buf(),
            None => match self.config.output_dir.as_deref() {
                Some(path) if path == Path::new("-") => path.to_path_buf(),
                Some(path) => self.configured_path(path),
                None => self.project_dir.join(DEFAULT_OUTPUT_DIR),
            },
        }
    }

    fn output_format(&self, format: Option<OutputFormat>) -> Result<OutputFormat> {
        if let Some(format) = format {
            return Ok(format);
        }
        match self.config.format.as_deref() {
            Some(value) => value.parse().map_err(|message: String| {
                anyhow::Error::from(AuditError::Configuration {
                    message,
                    hint: "Set 'format' to 'markdown' or 'json' in the config file".to_string(),
                })
            }),
            None => Ok(OutputFormat::default()),
        }
    }
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode> {
    let workspace = Workspace::open(&args.common)?;
    let config = &workspace.config;

    // CLI flags win over the config file, which wins over the defaults
    let settings = RunSettings::new(
        args.recursive.or(config.recursive).unwrap_or(true),
        args.skip_test_scope.or(config.skip_test_scope).unwrap_or(false),
        args.skip_provided_scope
            .or(config.skip_provided_scope)
            .unwrap_or(false),
        args.common
            .skip_optionals
            .or(config.skip_optionals)
            .unwrap_or(false),
    );
    let fail_fast = args.fail_fast.or(config.fail_fast).unwrap_or(false);
    let valid_licenses = if args.valid_licenses.is_empty() {
        config.valid_licenses.clone().unwrap_or_default()
    } else {
        args.valid_licenses
    };

    let graph_file = workspace.graph_file(&args.common);
    let results_dir = workspace.results_dir(&args.common);
    debug!(
        "Validate pass: graph={}, results={}, settings={:?}, fail_fast={}",
        graph_file.display(),
        results_dir.display(),
        settings,
        fail_fast
    );

    // Create adapters (Dependency Injection)
    let graph_provider = ManifestGraphProvider::load(&graph_file)?;
    let results_store = FileSystemResultsStore::new(results_dir);
    let progress_reporter = StderrProgressReporter::new();

    let use_case = ValidateLicensesUseCase::new(&graph_provider, &results_store, &progress_reporter);
    let request = ValidateRequest::new(valid_licenses, settings)
        .with_catalog(config.license_catalog())
        .with_fail_fast(fail_fast);

    let response = use_case.execute(request)?;

    if response.is_valid() {
        progress_reporter.report_completion(&format!(
            "✅ All licenses of {} artifact(s) are valid",
            response.artifact_count
        ));
        Ok(ExitCode::Success)
    } else {
        progress_reporter.report_error(&format!(
            "❌ Invalid license(s) was/were found! {} of {} outcome(s) failed validation",
            response.invalid_count(),
            response.results.len()
        ));
        Ok(ExitCode::InvalidLicensesFound)
    }
}

fn run_report(args: ReportArgs) -> Result<ExitCode> {
    let workspace = Workspace::open(&args.common)?;

    let format = workspace.output_format(args.format)?;
    let skip_optionals = args
        .common
        .skip_optionals
        .or(workspace.config.skip_optionals);
    let graph_file = workspace.graph_file(&args.common);
    let results_dir = workspace.results_dir(&args.common);
    let output_dir = workspace.output_dir(args.output.as_deref());

    // Create adapters (Dependency Injection)
    let results_store = FileSystemResultsStore::new(results_dir);
    let graph_provider = ManifestGraphProvider::load(&graph_file)?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = GenerateReportUseCase::new(&graph_provider, &results_store, &progress_reporter);
    let response = use_case.execute(ReportRequest::new(skip_optionals))?;

    progress_reporter.report(FormatterFactory::progress_message(format));
    let formatter = FormatterFactory::create(format);
    let rendered = formatter
        .format(&response.report)
        .context("Failed to render the license report")?;

    let presenter = PresenterFactory::create(PresenterType::for_output_dir(&output_dir, format));
    presenter.present(&rendered)?;

    progress_reporter.report_completion("✅ License report generated");
    Ok(ExitCode::Success)
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
