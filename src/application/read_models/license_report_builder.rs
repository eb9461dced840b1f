//! Builder recombining the rebuilt dependency tree with persisted outcomes

use super::license_report::{
    HierarchyNodeView, LicenseReport, LicenseView, ReportMetadataView, ReportSummary,
};
use crate::audit::domain::{
    ArtifactCoordinate, DependencyTree, ReportMetadata, ResultsIndex, RunSettings,
    ValidationResult,
};
use std::collections::HashSet;

/// Builder for [`LicenseReport`]
///
/// Pure function of its inputs; neither the tree nor the index is modified.
pub struct LicenseReportBuilder;

impl LicenseReportBuilder {
    pub fn build(
        tree: &DependencyTree,
        index: &ResultsIndex,
        settings: &RunSettings,
        metadata: &ReportMetadata,
    ) -> LicenseReport {
        LicenseReport {
            metadata: Self::build_metadata(metadata),
            project: tree.coordinate().to_string(),
            settings: *settings,
            direct_licenses: Self::direct_licenses(tree, index),
            transitive_licenses: Self::transitive_licenses(tree, index),
            hierarchy: Self::build_hierarchy(tree, index),
            summary: Self::build_summary(tree, index),
        }
    }

    fn build_metadata(metadata: &ReportMetadata) -> ReportMetadataView {
        ReportMetadataView {
            timestamp: metadata.timestamp().to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            serial_number: metadata.serial_number().to_string(),
        }
    }

    /// Distinct license names among the root's immediate children
    pub fn direct_licenses(tree: &DependencyTree, index: &ResultsIndex) -> Vec<LicenseView> {
        distinct_licenses(tree.children().iter(), index)
    }

    /// Distinct license names among the descendants of each immediate child
    pub fn transitive_licenses(tree: &DependencyTree, index: &ResultsIndex) -> Vec<LicenseView> {
        distinct_licenses(
            tree.children().iter().flat_map(DependencyTree::descendants),
            index,
        )
    }

    pub fn build_hierarchy(tree: &DependencyTree, index: &ResultsIndex) -> HierarchyNodeView {
        let artifact = tree.artifact_info();
        HierarchyNodeView {
            coordinate: tree.coordinate().to_string(),
            scope: artifact.map(|a| a.scope().to_string()),
            optional: artifact.is_some_and(|a| a.is_optional()),
            licenses: index
                .results_for(tree.coordinate())
                .iter()
                .map(license_view)
                .collect(),
            children: tree
                .children()
                .iter()
                .map(|child| Self::build_hierarchy(child, index))
                .collect(),
        }
    }

    fn build_summary(tree: &DependencyTree, index: &ResultsIndex) -> ReportSummary {
        let mut seen: HashSet<&ArtifactCoordinate> = HashSet::new();
        let mut summary = ReportSummary::default();

        for node in tree.descendants() {
            let coordinate = node.coordinate();
            if !seen.insert(coordinate) {
                continue;
            }
            summary.artifact_count += 1;

            let results = index.results_for(coordinate);
            if results.is_empty() {
                summary.artifacts_without_results.push(coordinate.to_string());
            }
            summary.invalid_count += results.iter().filter(|r| !r.is_valid()).count();
        }

        summary
    }
}

/// First outcome per distinct original license name, in enumeration order
fn distinct_licenses<'a, I>(nodes: I, index: &ResultsIndex) -> Vec<LicenseView>
where
    I: Iterator<Item = &'a DependencyTree>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut licenses = Vec::new();

    for node in nodes {
        for result in index.results_for(node.coordinate()) {
            if seen.insert(result.original_license_name()) {
                licenses.push(license_view(result));
            }
        }
    }

    licenses
}

fn license_view(result: &ValidationResult) -> LicenseView {
    LicenseView {
        original_name: result.original_license_name().to_string(),
        original_url: result.original_license_url().map(String::from),
        license_name: result.license().map(|l| l.name().to_string()),
        license_url: result.license().and_then(|l| l.url()).map(String::from),
        valid: result.is_valid(),
    }
}
