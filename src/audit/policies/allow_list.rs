use crate::shared::error::AuditError;
use crate::shared::Result;
use std::collections::BTreeSet;

/// AllowList policy: the set of license names accepted by configuration.
///
/// Membership is an exact, case-sensitive string match. The license catalog
/// never widens or narrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    names: BTreeSet<String>,
}

impl AllowList {
    /// Builds the allow-list.
    ///
    /// # Errors
    /// A `Configuration` error if the list is empty or holds a blank name.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(AuditError::Configuration {
                    message: "valid license names must not be empty".to_string(),
                    hint: "Remove blank entries from the valid license list".to_string(),
                }
                .into());
            }
            set.insert(name);
        }

        if set.is_empty() {
            return Err(AuditError::Configuration {
                message: "no valid licenses configured".to_string(),
                hint: "Pass at least one --valid-license or set valid_licenses in the config file"
                    .to_string(),
            }
            .into());
        }

        Ok(Self { names: set })
    }

    /// Whether a declared license name is accepted. Missing or empty names never are.
    pub fn permits(&self, name: Option<&str>) -> bool {
        match name {
            Some(name) if !name.is_empty() => self.names.contains(name),
            _ => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
