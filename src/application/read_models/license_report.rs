//! License report read model
//!
//! In-memory document assembled once by the report pass and rendered by
//! each formatter in a single pass.

use crate::audit::domain::RunSettings;
use serde::Serialize;

/// The whole report document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseReport {
    pub metadata: ReportMetadataView,
    /// Coordinate of the audited project
    pub project: String,
    /// Settings persisted by the validate pass the report is based on
    pub settings: RunSettings,
    /// Distinct licenses of the project's immediate dependencies
    pub direct_licenses: Vec<LicenseView>,
    /// Distinct licenses of everything two or more levels deep
    pub transitive_licenses: Vec<LicenseView>,
    /// Full dependency tree with every outcome per node
    pub hierarchy: HierarchyNodeView,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadataView {
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    pub serial_number: String,
}

/// One validation outcome as shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseView {
    /// License name as declared by the artifact
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    /// Catalog name, when the declared license was recognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNodeView {
    pub coordinate: String,
    /// `None` for the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    /// Empty when no outcome was persisted for this coordinate
    pub licenses: Vec<LicenseView>,
    pub children: Vec<HierarchyNodeView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Distinct artifacts in the tree
    pub artifact_count: usize,
    /// Invalid outcomes over the distinct artifacts
    pub invalid_count: usize,
    /// Artifacts in the tree with no persisted outcome
    pub artifacts_without_results: Vec<String>,
}
