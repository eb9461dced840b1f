use license_audit::prelude::*;
use std::sync::Mutex;

/// Mock ResultsStore keeping the persisted state in memory
#[derive(Default)]
pub struct MockResultsStore {
    state: Mutex<Option<(RunSettings, Vec<ValidationResult>)>>,
}

impl MockResultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().is_none()
    }
}

impl ResultsStore for MockResultsStore {
    fn ensure_available(&self) -> Result<()> {
        if self.is_empty() {
            return Err(AuditError::Configuration {
                message: "no validation results".to_string(),
                hint: "run the validate pass first".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn write(&self, settings: &RunSettings, results: &[ValidationResult]) -> Result<()> {
        *self.state.lock().unwrap() = Some((*settings, results.to_vec()));
        Ok(())
    }

    fn read_settings(&self) -> Result<RunSettings> {
        self.ensure_available()?;
        Ok(self.state.lock().unwrap().as_ref().unwrap().0)
    }

    fn read_results(&self) -> Result<Vec<ValidationResult>> {
        self.ensure_available()?;
        Ok(self.state.lock().unwrap().as_ref().unwrap().1.clone())
    }
}
