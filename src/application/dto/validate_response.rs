use crate::audit::domain::{RunSettings, ValidationResult};

/// ValidateResponse - outcome of a completed validate pass
#[derive(Debug, Clone)]
pub struct ValidateResponse {
    /// Settings as persisted
    pub settings: RunSettings,
    /// Every outcome, in emission order
    pub results: Vec<ValidationResult>,
    /// Distinct artifacts audited
    pub artifact_count: usize,
}

impl ValidateResponse {
    pub fn invalid_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_valid()).count()
    }

    /// Overall verdict of the run
    pub fn is_valid(&self) -> bool {
        self.invalid_count() == 0
    }
}
