use license_audit::ports::outbound::{DependencyDeclaration, ResolvedArtifact};
use license_audit::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock ArtifactGraphProvider backed by an in-memory map
pub struct MockGraphProvider {
    project: ArtifactCoordinate,
    artifacts: HashMap<ArtifactCoordinate, ResolvedArtifact>,
    failing: Option<ArtifactCoordinate>,
    resolve_calls: AtomicUsize,
}

impl MockGraphProvider {
    pub fn new(project: &str) -> Self {
        let project: ArtifactCoordinate = project.parse().unwrap();
        let mut artifacts = HashMap::new();
        artifacts.insert(project.clone(), ResolvedArtifact::default());
        Self {
            project,
            artifacts,
            failing: None,
            resolve_calls: AtomicUsize::new(0),
        }
    }

    /// Adds `coordinate` as a dependency of `parent`, declaring `licenses` by name
    pub fn with_dependency(
        mut self,
        parent: &str,
        coordinate: &str,
        scope: Scope,
        optional: bool,
        licenses: &[&str],
    ) -> Self {
        let parent: ArtifactCoordinate = parent.parse().unwrap();
        let coordinate: ArtifactCoordinate = coordinate.parse().unwrap();
        self.artifacts
            .entry(parent)
            .or_default()
            .dependencies
            .push(DependencyDeclaration::new(coordinate.clone(), scope, optional));
        let entry = self.artifacts.entry(coordinate).or_default();
        entry.licenses = licenses
            .iter()
            .map(|name| DeclaredLicense::new(Some(name.to_string()), None))
            .collect();
        self
    }

    /// Makes resolving `coordinate` fail
    pub fn with_failure(mut self, coordinate: &str) -> Self {
        self.failing = Some(coordinate.parse().unwrap());
        self
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

impl ArtifactGraphProvider for MockGraphProvider {
    fn project(&self) -> Result<ArtifactCoordinate> {
        Ok(self.project.clone())
    }

    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.as_ref() == Some(coordinate) {
            return Err(AuditError::Resolution {
                coordinate: coordinate.to_string(),
                details: "mock resolution failure".to_string(),
            }
            .into());
        }
        Ok(self.artifacts.get(coordinate).cloned().unwrap_or_default())
    }
}
