//! Read models for the report pass
//!
//! View-optimized structs assembled from the dependency tree and the
//! persisted validation outcomes.

pub mod license_report;
pub mod license_report_builder;

pub use license_report::{
    HierarchyNodeView, LicenseReport, LicenseView, ReportMetadataView, ReportSummary,
};
pub use license_report_builder::LicenseReportBuilder;
