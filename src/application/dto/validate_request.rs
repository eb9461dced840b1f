use crate::audit::domain::{LicenseCatalog, RunSettings};

/// ValidateRequest - configuration of one validate pass
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    /// Accepted license names; must not be empty
    pub valid_licenses: Vec<String>,
    /// Catalog used to annotate outcomes for display
    pub catalog: LicenseCatalog,
    /// Tree-shaping settings, persisted for the report pass
    pub settings: RunSettings,
    /// Abort on the first invalid outcome
    pub fail_fast: bool,
}

impl ValidateRequest {
    pub fn new(valid_licenses: Vec<String>, settings: RunSettings) -> Self {
        Self {
            valid_licenses,
            catalog: LicenseCatalog::builtin(),
            settings,
            fail_fast: false,
        }
    }

    pub fn with_catalog(mut self, catalog: LicenseCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}
