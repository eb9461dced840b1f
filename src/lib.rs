//! license-audit - dependency license validation and reporting
//!
//! This library checks every license declared by a project's dependency tree
//! against an allow-list and turns the persisted outcomes into a report. It
//! runs as two passes: the validate pass judges licenses and writes its
//! results to disk, the report pass reads them back and renders a document.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`audit`): Artifacts, the dependency tree, licenses and validation rules
//! - **Application Layer** (`application`): Use cases for both passes and the report read model
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Graph manifest, results store, formatters and console output
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use license_audit::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> Result<()> {
//! let graph = ManifestGraphProvider::load(Path::new("license-audit.graph.toml"))?;
//! let store = FileSystemResultsStore::new(PathBuf::from("target/licenses"));
//! let reporter = StderrProgressReporter::new();
//!
//! // Validate pass
//! let settings = RunSettings::new(true, false, false, false);
//! let request = ValidateRequest::new(vec!["Apache-2.0".to_string(), "MIT".to_string()], settings);
//! let response = ValidateLicensesUseCase::new(&graph, &store, &reporter).execute(request)?;
//! println!("valid: {}", response.is_valid());
//!
//! // Report pass
//! let report = GenerateReportUseCase::new(&graph, &store, &reporter)
//!     .execute(ReportRequest::default())?
//!     .report;
//! println!("{}", MarkdownFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod audit;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemResultsStore, FileSystemWriter, ManifestGraphProvider, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{
        OutputFormat, ReportRequest, ReportResponse, ValidateRequest, ValidateResponse,
    };
    pub use crate::application::read_models::{LicenseReport, LicenseReportBuilder};
    pub use crate::application::use_cases::{GenerateReportUseCase, ValidateLicensesUseCase};
    pub use crate::audit::domain::{
        ArtifactCoordinate, ArtifactInfo, DeclaredLicense, DependencyTree, KnownLicense,
        LicenseCatalog, ResultsIndex, RunSettings, Scope, ValidationResult,
    };
    pub use crate::audit::policies::AllowList;
    pub use crate::audit::services::{DependencyTreeBuilder, LicenseValidator, ValidationOptions};
    pub use crate::ports::outbound::{
        ArtifactGraphProvider, OutputPresenter, ProgressReporter, ReportFormatter, ResultsStore,
    };
    pub use crate::shared::error::{AuditError, ExitCode};
    pub use crate::shared::Result;
}
