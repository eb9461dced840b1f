use crate::audit::domain::{ArtifactCoordinate, DeclaredLicense, RunSettings, Scope, ValidationResult};
use crate::ports::outbound::{
    ArtifactGraphProvider, DependencyDeclaration, ProgressReporter, ResolvedArtifact,
    ResultsStore,
};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory artifact graph keyed by coordinate
pub struct MockGraph {
    root: ArtifactCoordinate,
    artifacts: HashMap<ArtifactCoordinate, ResolvedArtifact>,
    pub resolve_calls: Cell<usize>,
}

impl MockGraph {
    pub fn new(root: &str) -> Self {
        let root: ArtifactCoordinate = root.parse().unwrap();
        let mut artifacts = HashMap::new();
        artifacts.insert(root.clone(), ResolvedArtifact::default());
        Self {
            root,
            artifacts,
            resolve_calls: Cell::new(0),
        }
    }

    /// Declares an artifact and adds it as a dependency of `parent`
    pub fn with(
        mut self,
        parent: &str,
        coordinate: &str,
        scope: Scope,
        optional: bool,
        licenses: &[&str],
    ) -> Self {
        let coordinate: ArtifactCoordinate = coordinate.parse().unwrap();
        let parent: ArtifactCoordinate = parent.parse().unwrap();
        self.artifacts
            .entry(parent)
            .or_default()
            .dependencies
            .push(DependencyDeclaration::new(coordinate.clone(), scope, optional));
        self.artifacts.entry(coordinate).or_default().licenses =
            licenses.iter().map(|l| DeclaredLicense::named(l)).collect();
        self
    }
}

impl ArtifactGraphProvider for MockGraph {
    fn project(&self) -> Result<ArtifactCoordinate> {
        Ok(self.root.clone())
    }

    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        self.resolve_calls.set(self.resolve_calls.get() + 1);
        self.artifacts.get(coordinate).cloned().ok_or_else(|| {
            AuditError::Resolution {
                coordinate: coordinate.to_string(),
                details: "unknown".to_string(),
            }
            .into()
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub state: RefCell<Option<(RunSettings, Vec<ValidationResult>)>>,
}

impl MemoryStore {
    pub fn with_state(settings: RunSettings, results: Vec<ValidationResult>) -> Self {
        Self {
            state: RefCell::new(Some((settings, results))),
        }
    }
}

impl ResultsStore for MemoryStore {
    fn ensure_available(&self) -> Result<()> {
        if self.state.borrow().is_none() {
            return Err(AuditError::Configuration {
                message: "nothing persisted".to_string(),
                hint: "run validate".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn write(&self, settings: &RunSettings, results: &[ValidationResult]) -> Result<()> {
        *self.state.borrow_mut() = Some((*settings, results.to_vec()));
        Ok(())
    }

    fn read_settings(&self) -> Result<RunSettings> {
        self.ensure_available()?;
        Ok(self.state.borrow().as_ref().map(|(s, _)| *s).unwrap_or_default())
    }

    fn read_results(&self) -> Result<Vec<ValidationResult>> {
        self.ensure_available()?;
        Ok(self
            .state
            .borrow()
            .as_ref()
            .map(|(_, r)| r.clone())
            .unwrap_or_default())
    }
}

pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}
