pub mod artifact;
pub mod dependency_tree;
pub mod license;
pub mod report_metadata;
pub mod results_index;
pub mod run_settings;

pub use artifact::{ArtifactCoordinate, ArtifactInfo, DeclaredLicense, Scope};
pub use dependency_tree::{Descendants, DependencyTree, TreeNode};
pub use license::{KnownLicense, LicenseCatalog, ValidationResult};
pub use report_metadata::ReportMetadata;
pub use results_index::ResultsIndex;
pub use run_settings::RunSettings;
