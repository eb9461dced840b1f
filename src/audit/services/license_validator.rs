use crate::audit::domain::{
    ArtifactCoordinate, ArtifactInfo, DependencyTree, LicenseCatalog, Scope, ValidationResult,
};
use crate::audit::policies::AllowList;
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::collections::HashSet;
use tracing::{debug, error, info};

/// License name recorded for the explicit test-scope bypass
pub const TEST_SCOPE_LICENSE_NAME: &str = "test scope";

/// License name recorded when an artifact declares no usable license
pub const NO_LICENSE_FOUND: &str = "no license found";

/// Switches for a validation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Test-scope artifacts get one synthetic valid outcome instead of an audit
    pub skip_test_scope: bool,
    /// The first invalid outcome aborts the whole run
    pub fail_fast: bool,
}

/// Every outcome of a validation run, in emission order
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub results: Vec<ValidationResult>,
    pub artifact_count: usize,
}

impl ValidationOutcome {
    pub fn invalid_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_valid()).count()
    }

    /// Overall verdict: true when no invalid outcome was produced
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(ValidationResult::is_valid)
    }
}

/// LicenseValidator service for judging declared licenses against the allow-list
///
/// The catalog lookup is attached to each outcome for display only.
pub struct LicenseValidator<'a> {
    allow_list: &'a AllowList,
    catalog: &'a LicenseCatalog,
    options: ValidationOptions,
}

impl<'a> LicenseValidator<'a> {
    pub fn new(
        allow_list: &'a AllowList,
        catalog: &'a LicenseCatalog,
        options: ValidationOptions,
    ) -> Self {
        Self {
            allow_list,
            catalog,
            options,
        }
    }

    /// Validates every artifact node of the tree (the project root is not an artifact)
    ///
    /// # Errors
    /// In fail-fast mode, `AuditError::InvalidLicenseFound` on the first invalid outcome.
    pub fn validate(&self, tree: &DependencyTree) -> Result<ValidationOutcome> {
        self.validate_with_progress(tree, |_, _, _| {})
    }

    /// Same as [`validate`](Self::validate), calling `on_artifact(current, total, artifact)`
    /// before each artifact node is checked.
    pub fn validate_with_progress<F>(
        &self,
        tree: &DependencyTree,
        mut on_artifact: F,
    ) -> Result<ValidationOutcome>
    where
        F: FnMut(usize, usize, &ArtifactInfo),
    {
        let artifacts: Vec<&ArtifactInfo> = tree
            .descendants()
            .filter_map(DependencyTree::artifact_info)
            .collect();
        let total = artifacts.len();

        let mut emitted: HashSet<(ArtifactCoordinate, String)> = HashSet::new();
        let mut seen: HashSet<&ArtifactCoordinate> = HashSet::new();
        let mut outcome = ValidationOutcome::default();

        for (idx, artifact) in artifacts.into_iter().enumerate() {
            on_artifact(idx + 1, total, artifact);
            debug!("Check {}.", artifact.coordinate());
            seen.insert(artifact.coordinate());

            for result in self.validate_artifact(artifact) {
                let key = (
                    result.artifact().clone(),
                    result.original_license_name().to_string(),
                );
                if !emitted.insert(key) {
                    continue;
                }

                log_result(&result);
                if !result.is_valid() && self.options.fail_fast {
                    return Err(AuditError::InvalidLicenseFound {
                        artifact: result.artifact().to_string(),
                        license: result.original_license_name().to_string(),
                    }
                    .into());
                }
                outcome.results.push(result);
            }
        }

        outcome.artifact_count = seen.len();
        Ok(outcome)
    }

    /// Outcomes for one artifact: at least one, one per declared license otherwise
    pub fn validate_artifact(&self, artifact: &ArtifactInfo) -> Vec<ValidationResult> {
        let coordinate = artifact.coordinate();

        if self.options.skip_test_scope && artifact.scope() == Scope::Test {
            return vec![ValidationResult::new(
                coordinate.clone(),
                artifact.scope(),
                TEST_SCOPE_LICENSE_NAME.to_string(),
                None,
                None,
                true,
            )];
        }

        if artifact.licenses().is_empty() {
            return vec![self.no_license_found(artifact)];
        }

        artifact
            .licenses()
            .iter()
            .map(|declared| match declared.name() {
                None => self.no_license_found(artifact),
                Some(name) => ValidationResult::new(
                    coordinate.clone(),
                    artifact.scope(),
                    name.to_string(),
                    declared.url().map(String::from),
                    self.catalog.resolve(Some(name), declared.url()).cloned(),
                    self.allow_list.permits(Some(name)),
                ),
            })
            .collect()
    }

    fn no_license_found(&self, artifact: &ArtifactInfo) -> ValidationResult {
        ValidationResult::new(
            artifact.coordinate().clone(),
            artifact.scope(),
            NO_LICENSE_FOUND.to_string(),
            None,
            None,
            false,
        )
    }
}

fn log_result(result: &ValidationResult) {
    if result.is_valid() {
        info!(
            "License check for artifact '{}': valid ({})",
            result.artifact(),
            result.original_license_name()
        );
    } else {
        error!(
            "License check for artifact '{}': invalid ({})",
            result.artifact(),
            result.original_license_name()
        );
    }
}
