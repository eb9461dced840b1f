use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// The validate pass distinguishes a failing license verdict from an
/// execution error so CI systems can tell "disallowed license" apart from
/// "the audit could not run".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every license is approved, or the report was written
    Success = 0,
    /// At least one invalid license was found by the validate pass
    InvalidLicensesFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, resolution, file I/O, malformed results, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a pipeline error to the exit code reported to the caller.
    ///
    /// Only a fail-fast license verdict maps to `InvalidLicensesFound`;
    /// every other error is an execution failure.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<AuditError>() {
            Some(AuditError::InvalidLicenseFound { .. }) => ExitCode::InvalidLicensesFound,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidLicensesFound => write!(f, "Invalid Licenses Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for license validation and reporting.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    Configuration { message: String, hint: String },

    #[error("Failed to resolve artifact: {coordinate}\nDetails: {details}\n\n💡 Hint: A license audit requires the complete dependency graph; check the graph manifest")]
    Resolution { coordinate: String, details: String },

    /// Terminal verdict raised in fail-fast mode on the first invalid outcome
    #[error("Invalid license(s) was/were found!\nFirst finding: artifact '{artifact}' ({license})")]
    InvalidLicenseFound { artifact: String, license: String },

    #[error("Failed to persist validation state: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the results directory exists and is writable")]
    Persistence { path: PathBuf, details: String },

    #[error("Malformed record in {path} at line {line}\nDetails: {details}\n\n💡 Hint: The results file is corrupted; re-run the validate pass")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        details: String,
    },

    #[error("Unsupported results format version {found} in {path} (supported: {supported})\n\n💡 Hint: Re-run the validate pass with this version of the tool")]
    UnsupportedFormatVersion {
        path: PathBuf,
        found: String,
        supported: u32,
    },

    #[error("Report generation failed: {details}\n\n💡 Hint: Re-run the validate pass with the same settings before generating the report")]
    ReportAssembly { details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
