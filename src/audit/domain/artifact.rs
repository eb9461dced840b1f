use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a single coordinate component (security limit)
const MAX_COMPONENT_LENGTH: usize = 255;

/// Immutable artifact identity: group, name and version.
///
/// Equality and hashing use all three fields. This is the join key between
/// tree nodes and persisted validation results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    group: String,
    name: String,
    version: String,
}

impl ArtifactCoordinate {
    pub fn new(group: String, name: String, version: String) -> Result<Self> {
        Self::check_component("group", &group)?;
        Self::check_component("name", &name)?;
        Self::check_component("version", &version)?;
        Ok(Self {
            group,
            name,
            version,
        })
    }

    fn check_component(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            anyhow::bail!("Artifact {} cannot be empty", field);
        }
        if value.len() > MAX_COMPONENT_LENGTH {
            anyhow::bail!(
                "Artifact {} is too long ({} bytes). Maximum allowed: {} bytes",
                field,
                value.len(),
                MAX_COMPONENT_LENGTH
            );
        }
        if value.chars().any(|c| c.is_control()) {
            anyhow::bail!("Artifact {} contains control characters", field);
        }
        Ok(())
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// Parses the plain `group:name:version` notation used in graph manifests.
impl FromStr for ArtifactCoordinate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, name, version] => Self::new(
                group.to_string(),
                name.to_string(),
                version.to_string(),
            ),
            _ => anyhow::bail!(
                "Invalid artifact coordinate '{}': expected group:name:version",
                s
            ),
        }
    }
}

/// Build-time applicability of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Runtime,
    Test,
    Provided,
    System,
    Import,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::Provided => "provided",
            Scope::System => "system",
            Scope::Import => "import",
        }
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "compile" => Ok(Scope::Compile),
            "runtime" => Ok(Scope::Runtime),
            "test" => Ok(Scope::Test),
            "provided" => Ok(Scope::Provided),
            "system" => Ok(Scope::System),
            "import" => Ok(Scope::Import),
            _ => Err(format!(
                "Invalid scope: {}. Expected one of compile, runtime, test, provided, system, import",
                s
            )),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A license as declared by the artifact itself, not yet validated
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeclaredLicense {
    name: Option<String>,
    url: Option<String>,
}

impl DeclaredLicense {
    pub fn new(name: Option<String>, url: Option<String>) -> Self {
        Self { name, url }
    }

    pub fn named(name: &str) -> Self {
        Self::new(Some(name.to_string()), None)
    }

    /// The declared name, or `None` when it is missing or empty
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// One artifact as returned by the graph provider, positioned in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    coordinate: ArtifactCoordinate,
    scope: Scope,
    optional: bool,
    licenses: Vec<DeclaredLicense>,
}

impl ArtifactInfo {
    pub fn new(
        coordinate: ArtifactCoordinate,
        scope: Scope,
        optional: bool,
        licenses: Vec<DeclaredLicense>,
    ) -> Self {
        Self {
            coordinate,
            scope,
            optional,
            licenses,
        }
    }

    pub fn coordinate(&self) -> &ArtifactCoordinate {
        &self.coordinate
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn licenses(&self) -> &[DeclaredLicense] {
        &self.licenses
    }
}
