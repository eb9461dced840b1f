use crate::application::read_models::LicenseReport;

/// ReportResponse - the assembled report, ready for a formatter
#[derive(Debug, Clone)]
pub struct ReportResponse {
    pub report: LicenseReport,
}
