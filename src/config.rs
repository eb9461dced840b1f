//! Configuration file support for license-audit.
//!
//! Provides YAML-based configuration through `license-audit.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use license_audit::audit::domain::{KnownLicense, LicenseCatalog};
use license_audit::shared::security::read_regular_file;
use license_audit::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_FILENAME: &str = "license-audit.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub valid_licenses: Option<Vec<String>>,
    pub fail_fast: Option<bool>,
    pub recursive: Option<bool>,
    pub skip_test_scope: Option<bool>,
    pub skip_provided_scope: Option<bool>,
    pub skip_optionals: Option<bool>,
    pub results_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<String>,
    pub graph_file: Option<PathBuf>,
    /// Extra catalog entries, merged over the built-in catalog
    pub catalog: Option<Vec<CatalogEntry>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A license catalog entry supplied by configuration.
#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl ConfigFile {
    /// The built-in catalog extended with the configured entries
    pub fn license_catalog(&self) -> LicenseCatalog {
        let mut catalog = LicenseCatalog::builtin();
        for entry in self.catalog.iter().flatten() {
            catalog.insert(
                KnownLicense::new(entry.name.clone(), entry.url.clone()),
                entry.aliases.clone(),
            );
        }
        catalog
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "Config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref names) = config.valid_licenses {
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                bail!(
                    "Invalid config: valid_licenses[{}] must not be empty.\n\n\
                     💡 Hint: Each valid_licenses entry must name a license (e.g., \"Apache-2.0\").",
                    i
                );
            }
        }
    }
    if let Some(ref entries) = config.catalog {
        for (i, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                bail!(
                    "Invalid config: catalog[{}].name must not be empty.\n\n\
                     💡 Hint: Each catalog entry needs a canonical 'name' field.",
                    i
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!("Unknown config field '{}' will be ignored.", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
valid_licenses:
  - Apache-2.0
  - MIT
fail_fast: true
skip_test_scope: true
results_dir: build/licenses
format: json
catalog:
  - name: In-House-1.0
    url: https://example.com/license
    aliases: ["Example In-House License"]
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(
            config.valid_licenses.as_deref(),
            Some(&["Apache-2.0".to_string(), "MIT".to_string()][..])
        );
        assert_eq!(config.fail_fast, Some(true));
        assert_eq!(config.skip_test_scope, Some(true));
        assert!(config.recursive.is_none());
        assert_eq!(config.results_dir, Some(PathBuf::from("build/licenses")));
        assert_eq!(config.format.as_deref(), Some("json"));

        let catalog = config.license_catalog();
        let resolved = catalog
            .resolve(Some("example in-house license"), None)
            .unwrap();
        assert_eq!(resolved.name(), "In-House-1.0");
        assert!(catalog.resolve(Some("MIT"), None).is_some());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: markdown\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format.as_deref(), Some("markdown"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_blank_valid_license_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "valid_licenses:\n  - MIT\n  - \"   \"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("valid_licenses[1] must not be empty"));
    }

    #[test]
    fn test_blank_catalog_name_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "catalog:\n  - name: \"\"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("catalog[0].name must not be empty"));
    }

    #[test]
    fn test_unknown_fields_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "format: json\ncheck_cve: true\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 1);
        assert!(config.unknown_fields.contains_key("check_cve"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.valid_licenses.is_none());
        assert!(config.catalog.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
