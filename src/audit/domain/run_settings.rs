use super::Scope;
use serde::Serialize;

/// Tree-shaping settings of a run.
///
/// Written by the validate pass and read back by the report pass so both
/// passes build the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSettings {
    pub recursive: bool,
    pub skip_test_scope: bool,
    pub skip_provided_scope: bool,
    pub skip_optionals: bool,
}

impl RunSettings {
    pub fn new(
        recursive: bool,
        skip_test_scope: bool,
        skip_provided_scope: bool,
        skip_optionals: bool,
    ) -> Self {
        Self {
            recursive,
            skip_test_scope,
            skip_provided_scope,
            skip_optionals,
        }
    }

    /// Whether a dependency is left out of the tree under these settings
    pub fn excludes(&self, scope: Scope, optional: bool) -> bool {
        (self.skip_test_scope && scope == Scope::Test)
            || (self.skip_provided_scope && scope == Scope::Provided)
            || (self.skip_optionals && optional)
    }

    /// Settings for the tree both passes build. Test-scope artifacts stay in
    /// so each one carries its explicit test-scope bypass outcome into the
    /// report; `skip_test_scope` only selects that outcome.
    pub fn audit_tree_settings(&self) -> Self {
        Self {
            skip_test_scope: false,
            ..*self
        }
    }
}

/// Absent settings default to `true`, matching the settings file defaults.
impl Default for RunSettings {
    fn default() -> Self {
        Self::new(true, true, true, true)
    }
}
