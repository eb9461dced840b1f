use crate::audit::domain::{ArtifactCoordinate, DeclaredLicense, Scope};
use crate::shared::Result;

/// A direct dependency edge as declared by its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    pub coordinate: ArtifactCoordinate,
    pub scope: Scope,
    pub optional: bool,
}

impl DependencyDeclaration {
    pub fn new(coordinate: ArtifactCoordinate, scope: Scope, optional: bool) -> Self {
        Self {
            coordinate,
            scope,
            optional,
        }
    }
}

/// What the resolver knows about one artifact
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedArtifact {
    pub licenses: Vec<DeclaredLicense>,
    pub dependencies: Vec<DependencyDeclaration>,
}

impl ResolvedArtifact {
    pub fn new(licenses: Vec<DeclaredLicense>, dependencies: Vec<DependencyDeclaration>) -> Self {
        Self {
            licenses,
            dependencies,
        }
    }
}

/// ArtifactGraphProvider port for the external dependency resolver
///
/// Resolution of coordinates to repository files happens behind this port;
/// the core only sees declared licenses and direct dependency edges.
pub trait ArtifactGraphProvider {
    /// Coordinate of the project being audited (the tree root)
    fn project(&self) -> Result<ArtifactCoordinate>;

    /// Resolves one coordinate. For the project coordinate this yields the
    /// project's own direct dependencies.
    ///
    /// # Errors
    /// Returns an error if the coordinate cannot be resolved. Callers treat
    /// this as fatal for the whole run.
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact>;
}

impl<T: ArtifactGraphProvider + ?Sized> ArtifactGraphProvider for &T {
    fn project(&self) -> Result<ArtifactCoordinate> {
        (**self).project()
    }

    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        (**self).resolve(coordinate)
    }
}
