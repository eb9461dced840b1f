use crate::application::dto::{ValidateRequest, ValidateResponse};
use crate::audit::policies::AllowList;
use crate::audit::services::{DependencyTreeBuilder, LicenseValidator, ValidationOptions};
use crate::ports::outbound::{ArtifactGraphProvider, ProgressReporter, ResultsStore};
use crate::shared::Result;

/// ValidateLicensesUseCase - the validate pass
///
/// Builds the dependency tree, judges every declared license and persists
/// the outcomes together with the run settings for a later report pass.
///
/// # Type Parameters
/// * `G` - ArtifactGraphProvider implementation
/// * `S` - ResultsStore implementation
/// * `PR` - ProgressReporter implementation
pub struct ValidateLicensesUseCase<G, S, PR> {
    graph_provider: G,
    results_store: S,
    progress_reporter: PR,
}

impl<G, S, PR> ValidateLicensesUseCase<G, S, PR>
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

    /// Executes the validate pass
    ///
    /// An invalid license is not an error: the verdict is carried by the
    /// response. In fail-fast mode the first invalid outcome is returned as
    /// `AuditError::InvalidLicenseFound` and nothing is persisted.
    ///
    /// # Errors
    /// Configuration, resolution and persistence failures.
    pub fn execute(&self, request: ValidateRequest) -> Result<ValidateResponse> {
        // Step 1: Configuration check, before any work
        let allow_list = AllowList::new(request.valid_licenses.iter().map(String::as_str))?;

        // Step 2: Build the audit tree
        self.progress_reporter
            .report("🌳 Building dependency tree...");
        let tree = DependencyTreeBuilder::build(
            &self.graph_provider,
            &request.settings.audit_tree_settings(),
        )?;
        self.progress_reporter.report(&format!(
            "✅ Resolved {} dependency node(s)",
            tree.descendant_count()
        ));

        // Step 3: Validate every artifact node
        self.progress_reporter.report(&format!(
            "🔍 Checking licenses against {} approved license(s)...",
            allow_list.len()
        ));
        let validator = LicenseValidator::new(
            &allow_list,
            &request.catalog,
            ValidationOptions {
                skip_test_scope: request.settings.skip_test_scope,
                fail_fast: request.fail_fast,
            },
        );
        let outcome = validator.validate_with_progress(&tree, |current, total, artifact| {
            let coordinate = artifact.coordinate().to_string();
            self.progress_reporter
                .report_progress(current, total, Some(&coordinate));
        })?;

        // Step 4: Persist for the report pass
        self.progress_reporter
            .report("💾 Writing validation results...");
        self.results_store.write(&request.settings, &outcome.results)?;

        Ok(ValidateResponse {
            settings: request.settings,
            results: outcome.results,
            artifact_count: outcome.artifact_count,
        })
    }
}
