use crate::audit::domain::ReportMetadata;
use chrono::Utc;
use uuid::Uuid;

/// Generates report provenance: current timestamp and a unique serial number
pub struct ReportMetadataGenerator;

impl ReportMetadataGenerator {
    pub fn generate_metadata(tool_name: &str, tool_version: &str) -> ReportMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let serial_number = format!("urn:uuid:{}", Uuid::new_v4());

        ReportMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            serial_number,
        )
    }

    /// Metadata naming this tool, with the compile-time crate version
    pub fn generate_default_metadata() -> ReportMetadata {
        Self::generate_metadata(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}
