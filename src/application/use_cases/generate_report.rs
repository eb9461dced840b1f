use crate::application::dto::{ReportRequest, ReportResponse};
use crate::application::read_models::LicenseReportBuilder;
use crate::audit::domain::ResultsIndex;
use crate::audit::services::{DependencyTreeBuilder, ReportMetadataGenerator};
use crate::ports::outbound::{ArtifactGraphProvider, ProgressReporter, ResultsStore};
use crate::shared::error::AuditError;
use crate::shared::Result;

/// GenerateReportUseCase - the report pass
///
/// Rebuilds the dependency tree the validate pass audited and recombines
/// it with the persisted outcomes. Never judges licenses itself.
///
/// # Type Parameters
/// * `G` - ArtifactGraphProvider implementation
/// * `S` - ResultsStore implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateReportUseCase<G, S, PR> {
    graph_provider: G,
    results_store: S,
    progress_reporter: PR,
}

impl<G, S, PR> GenerateReportUseCase<G, S, PR>
where
    G: ArtifactGraphProvider,
    S: ResultsStore,
    PR: ProgressReporter,
{
    pub fn new(graph_provider: G, results_store: S, progress_reporter: PR) -> Self {
        Self {
            graph_provider,
            results_store,
            progress_reporter,
        }
    }

    /// Executes the report pass
    ///
    /// # Errors
    /// - Configuration error if no validate pass output exists
    /// - Report-assembly error if the requested settings disagree with the persisted ones
    /// - Persistence errors for unreadable or malformed files
    /// - Resolution errors while rebuilding the tree
    pub fn execute(&self, request: ReportRequest) -> Result<ReportResponse> {
        // Step 1: Load persisted state
        self.results_store.ensure_available()?;
        let settings = self.results_store.read_settings()?;

        if let Some(requested) = request.skip_optionals {
            if requested != settings.skip_optionals {
                return Err(AuditError::ReportAssembly {
                    details: format!(
                        "skipOptionals={} was requested but the validate pass ran with skipOptionals={}",
                        requested, settings.skip_optionals
                    ),
                }
                .into());
            }
        }

        let index: ResultsIndex = self.results_store.read_results()?.into_iter().collect();
        self.progress_reporter.report(&format!(
            "📖 Loaded {} validation result(s) for {} artifact(s)",
            index.result_count(),
            index.artifact_count()
        ));

        // Step 2: Rebuild the tree the validate pass saw
        self.progress_reporter
            .report("🌳 Rebuilding dependency tree...");
        let tree =
            DependencyTreeBuilder::build(&self.graph_provider, &settings.audit_tree_settings())?;

        // Step 3: Assemble the report document
        let metadata = ReportMetadataGenerator::generate_default_metadata();
        let report = LicenseReportBuilder::build(&tree, &index, &settings, &metadata);

        let missing = report.summary.artifacts_without_results.len();
        if missing > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} artifact(s) have no validation results; the results may be stale.",
                missing
            ));
        }

        Ok(ReportResponse { report })
    }
}
