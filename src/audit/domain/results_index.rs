use super::{ArtifactCoordinate, ValidationResult};
use std::collections::HashMap;

/// Process-local lookup of persisted outcomes by coordinate.
///
/// Results with a (coordinate, original license name) key already present
/// are dropped, so the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct ResultsIndex {
    results: HashMap<ArtifactCoordinate, Vec<ValidationResult>>,
}

impl ResultsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a result; returns `false` if it was a duplicate
    pub fn insert(&mut self, result: ValidationResult) -> bool {
        let entries = self.results.entry(result.artifact().clone()).or_default();
        if entries
            .iter()
            .any(|existing| existing.original_license_name() == result.original_license_name())
        {
            return false;
        }
        entries.push(result);
        true
    }

    /// Results for a coordinate; empty if the coordinate was never validated
    pub fn results_for(&self, coordinate: &ArtifactCoordinate) -> &[ValidationResult] {
        self.results
            .get(coordinate)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, coordinate: &ArtifactCoordinate) -> bool {
        self.results.contains_key(coordinate)
    }

    pub fn artifact_count(&self) -> usize {
        self.results.len()
    }

    pub fn result_count(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    pub fn invalid_count(&self) -> usize {
        self.results
            .values()
            .flatten()
            .filter(|result| !result.is_valid())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl FromIterator<ValidationResult> for ResultsIndex {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        let mut index = Self::new();
        for result in iter {
            index.insert(result);
        }
        index
    }
}
