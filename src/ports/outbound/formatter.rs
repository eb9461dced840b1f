use crate::application::read_models::LicenseReport;
use crate::shared::Result;

/// ReportFormatter port for rendering the license report document
///
/// The report's logical structure is built once; each formatter is a single
/// rendering pass over it.
pub trait ReportFormatter {
    /// Renders the report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &LicenseReport) -> Result<String>;

    /// File extension of the rendered document, without the dot
    fn file_extension(&self) -> &'static str;
}
