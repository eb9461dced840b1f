mod dependency_tree_builder;
mod license_validator;
mod report_metadata_generator;

pub use dependency_tree_builder::{DependencyTreeBuilder, MAX_TREE_DEPTH};
pub use license_validator::{
    LicenseValidator, ValidationOptions, ValidationOutcome, NO_LICENSE_FOUND,
    TEST_SCOPE_LICENSE_NAME,
};
pub use report_metadata_generator::ReportMetadataGenerator;
