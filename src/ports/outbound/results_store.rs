use crate::audit::domain::{RunSettings, ValidationResult};
use crate::shared::Result;

/// ResultsStore port for the state shared between the validate and report passes
///
/// The two passes run as separate processes; this store is the only thing
/// they share. Single writer, then single reader; no locking.
pub trait ResultsStore {
    /// Checks that a previous validate pass left its files behind
    ///
    /// # Errors
    /// A configuration error naming what is missing.
    fn ensure_available(&self) -> Result<()>;

    /// Persists the run settings and every validation outcome
    fn write(&self, settings: &RunSettings, results: &[ValidationResult]) -> Result<()>;

    /// Reads back the persisted settings
    fn read_settings(&self) -> Result<RunSettings>;

    /// Reads back the persisted outcomes, deduplicated by
    /// (coordinate, original license name) keeping the first occurrence
    ///
    /// # Errors
    /// Any unreadable or malformed record aborts the read.
    fn read_results(&self) -> Result<Vec<ValidationResult>>;

    /// Reads settings and outcomes together
    fn read(&self) -> Result<(RunSettings, Vec<ValidationResult>)> {
        let settings = self.read_settings()?;
        let results = self.read_results()?;
        Ok((settings, results))
    }
}

impl<T: ResultsStore + ?Sized> ResultsStore for &T {
    fn ensure_available(&self) -> Result<()> {
        (**self).ensure_available()
    }

    fn write(&self, settings: &RunSettings, results: &[ValidationResult]) -> Result<()> {
        (**self).write(settings, results)
    }

    fn read_settings(&self) -> Result<RunSettings> {
        (**self).read_settings()
    }

    fn read_results(&self) -> Result<Vec<ValidationResult>> {
        (**self).read_results()
    }
}
