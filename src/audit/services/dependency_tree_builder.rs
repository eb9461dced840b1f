use crate::audit::domain::{ArtifactCoordinate, ArtifactInfo, DependencyTree, RunSettings};
use crate::ports::outbound::{ArtifactGraphProvider, DependencyDeclaration, ResolvedArtifact};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::collections::{HashMap, HashSet};

/// Maximum depth of the tree; deeper graphs fail rather than truncate
pub const MAX_TREE_DEPTH: usize = 256;

/// DependencyTreeBuilder service for turning the resolver's graph into an owned tree
///
/// Depth-first walk. The same filters apply to the children of every node.
/// A coordinate already on the current path is created as a leaf, which
/// terminates cycles while still letting a coordinate appear in several
/// branches.
pub struct DependencyTreeBuilder<'p, P: ArtifactGraphProvider> {
    provider: &'p P,
    settings: RunSettings,
    resolved: HashMap<ArtifactCoordinate, ResolvedArtifact>,
}

impl<'p, P: ArtifactGraphProvider> DependencyTreeBuilder<'p, P> {
    /// Builds the tree for the provider's project
    ///
    /// # Errors
    /// Any resolution failure aborts the build; no partial tree is returned.
    pub fn build(provider: &'p P, settings: &RunSettings) -> Result<DependencyTree> {
        let mut builder = Self {
            provider,
            settings: *settings,
            resolved: HashMap::new(),
        };

        let root = provider.project()?;
        let mut ancestors = HashSet::new();
        ancestors.insert(root.clone());

        let root_dependencies = builder.resolve(&root)?.dependencies;
        let children = builder.build_children(&root_dependencies, &mut ancestors, 1)?;

        Ok(DependencyTree::project(root, children))
    }

    fn build_children(
        &mut self,
        dependencies: &[DependencyDeclaration],
        ancestors: &mut HashSet<ArtifactCoordinate>,
        depth: usize,
    ) -> Result<Vec<DependencyTree>> {
        let mut children = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            if self.settings.excludes(dependency.scope, dependency.optional) {
                continue;
            }
            if depth > MAX_TREE_DEPTH {
                return Err(AuditError::Resolution {
                    coordinate: dependency.coordinate.to_string(),
                    details: format!(
                        "dependency chain exceeds the maximum depth of {}",
                        MAX_TREE_DEPTH
                    ),
                }
                .into());
            }
            children.push(self.build_node(dependency, ancestors, depth)?);
        }
        Ok(children)
    }

    fn build_node(
        &mut self,
        dependency: &DependencyDeclaration,
        ancestors: &mut HashSet<ArtifactCoordinate>,
        depth: usize,
    ) -> Result<DependencyTree> {
        let coordinate = &dependency.coordinate;
        let resolved = self.resolve(coordinate)?;
        let info = ArtifactInfo::new(
            coordinate.clone(),
            dependency.scope,
            dependency.optional,
            resolved.licenses,
        );

        let expand = self.settings.recursive && !ancestors.contains(coordinate);
        if !expand {
            return Ok(DependencyTree::artifact(info, Vec::new()));
        }

        ancestors.insert(coordinate.clone());
        let children = self.build_children(&resolved.dependencies, ancestors, depth + 1);
        ancestors.remove(coordinate);

        Ok(DependencyTree::artifact(info, children?))
    }

    /// Resolves a coordinate once per build
    fn resolve(&mut self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        if let Some(resolved) = self.resolved.get(coordinate) {
            return Ok(resolved.clone());
        }

        let resolved = self.provider.resolve(coordinate).map_err(|e| {
            match e.downcast::<AuditError>() {
                Ok(audit_error @ AuditError::Resolution { .. }) => audit_error,
                Ok(other) => AuditError::Resolution {
                    coordinate: coordinate.to_string(),
                    details: other.to_string(),
                },
                Err(e) => AuditError::Resolution {
                    coordinate: coordinate.to_string(),
                    details: format!("{:#}", e),
                },
            }
        })?;

        self.resolved.insert(coordinate.clone(), resolved.clone());
        Ok(resolved)
    }
}
