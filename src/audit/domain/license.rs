use super::{ArtifactCoordinate, Scope};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical license entry of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KnownLicense {
    name: String,
    url: Option<String>,
}

impl KnownLicense {
    pub fn new(name: String, url: Option<String>) -> Self {
        Self {
            name,
            url: url.filter(|u| !u.is_empty()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Built-in catalog: (canonical name, canonical URL, aliases)
const BUILTIN_LICENSES: &[(&str, &str, &[&str])] = &[
    (
        "Apache-2.0",
        "https://www.apache.org/licenses/LICENSE-2.0",
        &[
            "Apache 2.0",
            "Apache License 2.0",
            "Apache License, Version 2.0",
            "The Apache Software License, Version 2.0",
            "ASL 2.0",
        ],
    ),
    (
        "MIT",
        "https://opensource.org/licenses/MIT",
        &["MIT License", "The MIT License"],
    ),
    (
        "BSD-2-Clause",
        "https://opensource.org/licenses/BSD-2-Clause",
        &["BSD 2-Clause", "Simplified BSD", "The BSD 2-Clause License"],
    ),
    (
        "BSD-3-Clause",
        "https://opensource.org/licenses/BSD-3-Clause",
        &["BSD 3-Clause", "New BSD", "Modified BSD", "BSD License", "BSD"],
    ),
    ("ISC", "https://opensource.org/licenses/ISC", &["ISC License"]),
    (
        "MPL-2.0",
        "https://www.mozilla.org/en-US/MPL/2.0/",
        &["Mozilla Public License 2.0", "MPL 2.0"],
    ),
    (
        "EPL-1.0",
        "https://www.eclipse.org/legal/epl-v10.html",
        &["Eclipse Public License 1.0", "Eclipse Public License - v 1.0"],
    ),
    (
        "EPL-2.0",
        "https://www.eclipse.org/legal/epl-2.0/",
        &["Eclipse Public License 2.0", "Eclipse Public License - v 2.0"],
    ),
    (
        "CDDL-1.0",
        "https://opensource.org/licenses/CDDL-1.0",
        &["Common Development and Distribution License 1.0", "CDDL 1.0"],
    ),
    (
        "LGPL-2.1",
        "https://www.gnu.org/licenses/old-licenses/lgpl-2.1.html",
        &["GNU LGPL v2.1", "LGPL v2.1", "LGPLv2.1", "GNU Lesser General Public License v2.1"],
    ),
    (
        "LGPL-3.0",
        "https://www.gnu.org/licenses/lgpl-3.0.html",
        &["GNU LGPL v3", "LGPL v3", "LGPLv3", "GNU Lesser General Public License v3"],
    ),
    (
        "GPL-2.0",
        "https://www.gnu.org/licenses/old-licenses/gpl-2.0.html",
        &["GNU GPL v2", "GPL v2", "GPLv2", "GNU General Public License v2"],
    ),
    (
        "GPL-3.0",
        "https://www.gnu.org/licenses/gpl-3.0.html",
        &["GNU GPL v3", "GPL v3", "GPLv3", "GNU General Public License v3"],
    ),
    (
        "AGPL-3.0",
        "https://www.gnu.org/licenses/agpl-3.0.html",
        &["GNU AGPL v3", "AGPLv3", "GNU Affero General Public License v3"],
    ),
    ("Unlicense", "https://unlicense.org/", &["The Unlicense"]),
    (
        "CC0-1.0",
        "https://creativecommons.org/publicdomain/zero/1.0/",
        &["CC0", "Public Domain (CC0)"],
    ),
];

/// Read-only mapping from declared license strings to canonical licenses.
///
/// Lookups are for display only; the allow-list alone decides validity.
#[derive(Debug, Clone, Default)]
pub struct LicenseCatalog {
    licenses: Vec<KnownLicense>,
    by_name: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
    by_url: HashMap<String, usize>,
}

impl LicenseCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the catalog with the built-in license entries
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (name, url, aliases) in BUILTIN_LICENSES {
            catalog.insert(
                KnownLicense::new(name.to_string(), Some(url.to_string())),
                aliases.iter().map(|a| a.to_string()).collect(),
            );
        }
        catalog
    }

    /// Adds or replaces an entry. A later entry with the same canonical name
    /// replaces the earlier one; aliases accumulate.
    pub fn insert(&mut self, license: KnownLicense, aliases: Vec<String>) {
        let index = match self.by_name.get(license.name()) {
            Some(&existing) => {
                self.licenses[existing] = license.clone();
                existing
            }
            None => {
                self.licenses.push(license.clone());
                let index = self.licenses.len() - 1;
                self.by_name.insert(license.name().to_string(), index);
                index
            }
        };

        self.by_alias.insert(normalize_alias(license.name()), index);
        for alias in aliases {
            self.by_alias.insert(normalize_alias(&alias), index);
        }
        if let Some(url) = license.url() {
            self.by_url.insert(normalize_url(url), index);
        }
    }

    /// Resolves a declared license: canonical name first, then alias
    /// (trimmed, case-insensitive), then URL.
    pub fn resolve(&self, name: Option<&str>, url: Option<&str>) -> Option<&KnownLicense> {
        let by_name = name.and_then(|n| {
            self.by_name
                .get(n)
                .or_else(|| self.by_alias.get(&normalize_alias(n)))
        });
        let by_url = || url.and_then(|u| self.by_url.get(&normalize_url(u)));

        by_name.or_else(by_url).map(|&index| &self.licenses[index])
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }
}

fn normalize_alias(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Ignores scheme, `www.` prefix, and trailing slash
fn normalize_url(url: &str) -> String {
    let trimmed = url.trim().to_lowercase();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(&trimmed);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);
    without_www.trim_end_matches('/').to_string()
}

/// Outcome for one (artifact, declared license) pair. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    artifact: ArtifactCoordinate,
    scope: Scope,
    original_license_name: String,
    original_license_url: Option<String>,
    license: Option<KnownLicense>,
    valid: bool,
}

impl ValidationResult {
    pub fn new(
        artifact: ArtifactCoordinate,
        scope: Scope,
        original_license_name: String,
        original_license_url: Option<String>,
        license: Option<KnownLicense>,
        valid: bool,
    ) -> Self {
        Self {
            artifact,
            scope,
            original_license_name,
            original_license_url: original_license_url.filter(|u| !u.is_empty()),
            license,
            valid,
        }
    }

    pub fn artifact(&self) -> &ArtifactCoordinate {
        &self.artifact
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn original_license_name(&self) -> &str {
        &self.original_license_name
    }

    pub fn original_license_url(&self) -> Option<&str> {
        self.original_license_url.as_deref()
    }

    /// The resolved catalog license, if the declared license matched one
    pub fn license(&self) -> Option<&KnownLicense> {
        self.license.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Deduplication key shared by the validator and the results reader
    pub fn key(&self) -> (&ArtifactCoordinate, &str) {
        (&self.artifact, &self.original_license_name)
    }
}
