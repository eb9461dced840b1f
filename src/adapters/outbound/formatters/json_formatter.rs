use crate::application::read_models::{
    HierarchyNodeView, LicenseReport, LicenseView, ReportMetadataView, ReportSummary,
};
use crate::audit::domain::RunSettings;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use anyhow::Context;
use serde::Serialize;

const DOCUMENT_FORMAT: &str = "license-audit-report";
const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    report_format: &'static str,
    version: u32,
    metadata: &'a ReportMetadataView,
    project: &'a str,
    settings: &'a RunSettings,
    direct_licenses: &'a [LicenseView],
    transitive_licenses: &'a [LicenseView],
    hierarchy: &'a HierarchyNodeView,
    summary: &'a ReportSummary,
}

/// JsonFormatter adapter for the machine-readable report
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &LicenseReport) -> Result<String> {
        let document = JsonReport {
            report_format: DOCUMENT_FORMAT,
            version: DOCUMENT_VERSION,
            metadata: &report.metadata,
            project: &report.project,
            settings: &report.settings,
            direct_licenses: &report.direct_licenses,
            transitive_licenses: &report.transitive_licenses,
            hierarchy: &report.hierarchy,
            summary: &report.summary,
        };

        let mut json =
            serde_json::to_string_pretty(&document).context("Failed to serialize JSON report")?;
        json.push('\n');
        Ok(json)
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}
