use crate::audit::domain::{ArtifactCoordinate, DeclaredLicense, Scope};
use crate::ports::outbound::{ArtifactGraphProvider, DependencyDeclaration, ResolvedArtifact};
use crate::shared::error::AuditError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Default manifest file name, looked up in the project directory
pub const GRAPH_MANIFEST_FILE_NAME: &str = "license-audit.graph.toml";

#[derive(Debug, Deserialize)]
struct GraphManifest {
    project: ManifestProject,
    #[serde(default, rename = "artifact")]
    artifacts: Vec<ManifestArtifact>,
}

#[derive(Debug, Deserialize)]
struct ManifestProject {
    group: String,
    name: String,
    version: String,
    #[serde(default)]
    dependencies: Vec<ManifestDependency>,
}

#[derive(Debug, Deserialize)]
struct ManifestArtifact {
    coordinate: String,
    #[serde(default)]
    licenses: Vec<ManifestLicense>,
    #[serde(default)]
    dependencies: Vec<ManifestDependency>,
}

#[derive(Debug, Deserialize)]
struct ManifestLicense {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestDependency {
    coordinate: String,
    #[serde(default)]
    scope: Scope,
    #[serde(default)]
    optional: bool,
}

/// ManifestGraphProvider adapter serving an already-resolved artifact graph
///
/// The manifest is produced by whatever resolver the build uses; this adapter
/// only indexes it. Every coordinate referenced as a dependency must have its
/// own `[[artifact]]` table, otherwise resolving it fails.
#[derive(Debug)]
pub struct ManifestGraphProvider {
    project: ArtifactCoordinate,
    artifacts: HashMap<ArtifactCoordinate, ResolvedArtifact>,
}

impl ManifestGraphProvider {
    /// Loads a manifest file after the usual file safety checks
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AuditError::Configuration {
                message: format!("graph manifest {} not found", path.display()),
                hint: format!(
                    "Generate {} in the project directory or pass --graph-file",
                    GRAPH_MANIFEST_FILE_NAME
                ),
            }
            .into());
        }
        let content = read_regular_file(path, "Graph manifest")?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load graph manifest {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: GraphManifest =
            toml::from_str(content).context("Failed to parse graph manifest")?;

        let project = ArtifactCoordinate::new(
            manifest.project.group,
            manifest.project.name,
            manifest.project.version,
        )
        .context("Invalid [project] coordinate")?;

        let mut artifacts = HashMap::with_capacity(manifest.artifacts.len() + 1);
        artifacts.insert(
            project.clone(),
            ResolvedArtifact::new(vec![], convert_dependencies(manifest.project.dependencies)?),
        );

        for artifact in manifest.artifacts {
            let coordinate: ArtifactCoordinate = artifact
                .coordinate
                .parse()
                .with_context(|| format!("Invalid artifact coordinate '{}'", artifact.coordinate))?;
            let licenses = artifact
                .licenses
                .into_iter()
                .map(|l| DeclaredLicense::new(l.name, l.url))
                .collect();
            let resolved =
                ResolvedArtifact::new(licenses, convert_dependencies(artifact.dependencies)?);

            if artifacts.insert(coordinate.clone(), resolved).is_some() {
                anyhow::bail!("Artifact {} is declared more than once", coordinate);
            }
        }

        Ok(Self { project, artifacts })
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.len() - 1
    }
}

fn convert_dependencies(dependencies: Vec<ManifestDependency>) -> Result<Vec<DependencyDeclaration>> {
    dependencies
        .into_iter()
        .map(|d| {
            let coordinate = d
                .coordinate
                .parse()
                .with_context(|| format!("Invalid dependency coordinate '{}'", d.coordinate))?;
            Ok(DependencyDeclaration::new(coordinate, d.scope, d.optional))
        })
        .collect()
}

impl ArtifactGraphProvider for ManifestGraphProvider {
    fn project(&self) -> Result<ArtifactCoordinate> {
        Ok(self.project.clone())
    }

    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        self.artifacts.get(coordinate).cloned().ok_or_else(|| {
            AuditError::Resolution {
                coordinate: coordinate.to_string(),
                details: "artifact is not declared in the graph manifest".to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[project]
group = "com.example"
name = "app"
version = "1.0"
dependencies = [
    { coordinate = "org.apache:commons:2.0" },
    { coordinate = "junit:junit:4.13", scope = "test" },
]

[[artifact]]
coordinate = "org.apache:commons:2.0"
licenses = [{ name = "Apache-2.0", url = "https://www.apache.org/licenses/LICENSE-2.0" }]
dependencies = [{ coordinate = "org.slf4j:api:1.7", scope = "runtime", optional = true }]

[[artifact]]
coordinate = "org.slf4j:api:1.7"
licenses = [{ name = "MIT" }]

[[artifact]]
coordinate = "junit:junit:4.13"
"#;

    #[test]
    fn test_parse_manifest() {
        let provider = ManifestGraphProvider::from_toml_str(MANIFEST).unwrap();
        let root = provider.project().unwrap();
        assert_eq!(root.to_string(), "com.example:app:1.0");
        assert_eq!(provider.artifact_count(), 3);

        let project = provider.resolve(&root).unwrap();
        assert!(project.licenses.is_empty());
        assert_eq!(project.dependencies.len(), 2);
        assert_eq!(project.dependencies[0].scope, Scope::Compile);
        assert_eq!(project.dependencies[1].scope, Scope::Test);

        let commons = provider
            .resolve(&"org.apache:commons:2.0".parse().unwrap())
            .unwrap();
        assert_eq!(commons.licenses[0].name(), Some("Apache-2.0"));
        assert!(commons.dependencies[0].optional);
        assert_eq!(commons.dependencies[0].scope, Scope::Runtime);

        let junit = provider.resolve(&"junit:junit:4.13".parse().unwrap()).unwrap();
        assert!(junit.licenses.is_empty());
    }

    #[test]
    fn test_undeclared_coordinate_is_resolution_error() {
        let provider = ManifestGraphProvider::from_toml_str(MANIFEST).unwrap();
        let err = provider
            .resolve(&"org.unknown:x:1".parse().unwrap())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::Resolution { .. })
        ));
    }

    #[test]
    fn test_duplicate_artifact_rejected() {
        let content = r#"
[project]
group = "g"
name = "app"
version = "1"

[[artifact]]
coordinate = "g:a:1"

[[artifact]]
coordinate = "g:a:1"
"#;
        let err = ManifestGraphProvider::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_invalid_scope_rejected() {
        let content = r#"
[project]
group = "g"
name = "app"
version = "1"
dependencies = [{ coordinate = "g:a:1", scope = "sometimes" }]
"#;
        assert!(ManifestGraphProvider::from_toml_str(content).is_err());
    }

    #[test]
    fn test_load_missing_file_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = ManifestGraphProvider::load(&temp_dir.path().join(GRAPH_MANIFEST_FILE_NAME))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::Configuration { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(GRAPH_MANIFEST_FILE_NAME);
        fs::write(&path, MANIFEST).unwrap();
        let provider = ManifestGraphProvider::load(&path).unwrap();
        assert_eq!(provider.artifact_count(), 3);
    }
}
