use super::{ArtifactCoordinate, ArtifactInfo};

/// What a tree node stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Synthetic root representing the audited project itself
    Project(ArtifactCoordinate),
    /// A dependency artifact
    Artifact(ArtifactInfo),
}

/// Owned dependency tree.
///
/// Each node exclusively owns its children. A coordinate reachable through
/// several paths gets one node per position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    node: TreeNode,
    children: Vec<DependencyTree>,
}

impl DependencyTree {
    pub fn project(coordinate: ArtifactCoordinate, children: Vec<DependencyTree>) -> Self {
        Self {
            node: TreeNode::Project(coordinate),
            children,
        }
    }

    pub fn artifact(info: ArtifactInfo, children: Vec<DependencyTree>) -> Self {
        Self {
            node: TreeNode::Artifact(info),
            children,
        }
    }

    pub fn node(&self) -> &TreeNode {
        &self.node
    }

    pub fn coordinate(&self) -> &ArtifactCoordinate {
        match &self.node {
            TreeNode::Project(coordinate) => coordinate,
            TreeNode::Artifact(info) => info.coordinate(),
        }
    }

    /// The artifact of this node; `None` for the project root
    pub fn artifact_info(&self) -> Option<&ArtifactInfo> {
        match &self.node {
            TreeNode::Artifact(info) => Some(info),
            TreeNode::Project(_) => None,
        }
    }

    /// Direct dependencies, in declaration order
    pub fn children(&self) -> &[DependencyTree] {
        &self.children
    }

    /// All nodes below this one in pre-order, excluding this node.
    ///
    /// The iterator borrows the tree, so it can be created again at any time.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.descendants().count()
    }

    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Pre-order iterator over the descendants of a node
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a DependencyTree>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a DependencyTree;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
