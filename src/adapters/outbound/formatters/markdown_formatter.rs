use crate::application::read_models::{HierarchyNodeView, LicenseReport, LicenseView};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for license tables
const TABLE_HEADER: &str = "| License from Artifact | License | Validation |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|-----------------------|---------|------------|\n";

/// MarkdownFormatter adapter for the human-readable license report
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// Escapes characters that would change inline formatting
    fn escape_inline(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '*' | '_' | '[' | ']' | '`' | '\\' => {
                    out.push('\\');
                    out.push(c);
                }
                '\n' | '\r' => out.push(' '),
                c => out.push(c),
            }
        }
        out
    }

    fn link(text: &str, url: Option<&str>) -> String {
        match url {
            Some(url) => format!("[{}](<{}>)", Self::escape_inline(text), url.replace('>', "%3E")),
            None => Self::escape_inline(text),
        }
    }

    fn validation(valid: bool) -> &'static str {
        if valid {
            "valid"
        } else {
            "invalid"
        }
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, report: &LicenseReport) {
        output.push_str("# Licenses Report\n\n");
        output.push_str(
            "This report contains an overview of all licenses related to the project and a validation whether these licenses are approved or not.\n\n",
        );

        let settings = &report.settings;
        output.push_str(&format!(
            "- **Project:** {}\n",
            Self::escape_inline(&report.project)
        ));
        output.push_str(&format!(
            "- **Generated:** {} by {} {}\n",
            report.metadata.timestamp, report.metadata.tool_name, report.metadata.tool_version
        ));
        output.push_str(&format!(
            "- **Serial number:** {}\n",
            report.metadata.serial_number
        ));
        output.push_str(&format!(
            "- **Settings:** recursive={}, skipTestScope={}, skipProvidedScope={}, skipOptionals={}\n\n",
            settings.recursive,
            settings.skip_test_scope,
            settings.skip_provided_scope,
            settings.skip_optionals
        ));
    }

    fn render_license_table(&self, output: &mut String, licenses: &[LicenseView]) {
        if licenses.is_empty() {
            output.push_str("*No licenses*\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for license in licenses {
            let catalog = license
                .license_name
                .as_deref()
                .map(|name| Self::link(name, license.license_url.as_deref()))
                .unwrap_or_default();
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&Self::link(
                    &license.original_name,
                    license.original_url.as_deref()
                )),
                Self::escape_markdown_table_cell(&catalog),
                Self::validation(license.valid)
            ));
        }
        output.push('\n');
    }

    fn render_direct_licenses(&self, output: &mut String, report: &LicenseReport) {
        output.push_str("## Directly Used Licenses\n\n");
        output.push_str(
            "This section contains a list of all licenses which are directly referenced by dependencies of this project.\n\n",
        );
        self.render_license_table(output, &report.direct_licenses);
    }

    fn render_transitive_licenses(&self, output: &mut String, report: &LicenseReport) {
        output.push_str("## Transitively Used Licenses\n\n");
        output.push_str(
            "This section contains a list of all licenses which come in transitively via dependencies of the direct project dependencies.\n\n",
        );
        self.render_license_table(output, &report.transitive_licenses);
    }

    fn render_hierarchy(&self, output: &mut String, report: &LicenseReport) {
        output.push_str("## Dependency Hierarchy\n\n");
        output.push_str(
            "This section contains the full hierarchy of dependencies, their licenses and the validation result.\n\n",
        );
        if report.hierarchy.children.is_empty() {
            output.push_str("*No dependencies*\n\n");
            return;
        }
        for child in &report.hierarchy.children {
            self.render_node(output, child, 0);
        }
        output.push('\n');
    }

    fn render_node(&self, output: &mut String, node: &HierarchyNodeView, depth: usize) {
        let indent = "  ".repeat(depth);
        let mut label = format!("{}- **{}**", indent, Self::escape_inline(&node.coordinate));
        if let Some(scope) = &node.scope {
            label.push_str(&format!(" ({}{})", scope, if node.optional { ", optional" } else { "" }));
        }
        output.push_str(&label);
        output.push('\n');

        for license in &node.licenses {
            let mut line = format!(
                "{}: {}",
                Self::validation(license.valid),
                Self::link(&license.original_name, license.original_url.as_deref())
            );
            if let Some(name) = &license.license_name {
                line.push_str(" / ");
                line.push_str(&Self::link(name, license.license_url.as_deref()));
            }
            output.push_str(&format!("{}  - *{}*\n", indent, line));
        }

        for child in &node.children {
            self.render_node(output, child, depth + 1);
        }
    }

    fn render_summary(&self, output: &mut String, report: &LicenseReport) {
        let summary = &report.summary;
        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**{} {} audited, {} invalid license {}.**\n",
            summary.artifact_count,
            if summary.artifact_count == 1 {
                "artifact"
            } else {
                "artifacts"
            },
            summary.invalid_count,
            if summary.invalid_count == 1 {
                "finding"
            } else {
                "findings"
            }
        ));

        if !summary.artifacts_without_results.is_empty() {
            output.push_str("\nArtifacts without validation results:\n\n");
            for coordinate in &summary.artifacts_without_results {
                output.push_str(&format!("- {}\n", Self::escape_inline(coordinate)));
            }
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &LicenseReport) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, report);
        self.render_direct_licenses(&mut output, report);
        self.render_transitive_licenses(&mut output, report);
        self.render_hierarchy(&mut output, report);
        self.render_summary(&mut output, report);

        Ok(output)
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{ReportMetadataView, ReportSummary};
    use crate::audit::domain::RunSettings;

    fn license(name: &str, catalog: Option<&str>, valid: bool) -> LicenseView {
        LicenseView {
            original_name: name.to_string(),
            original_url: None,
            license_name: catalog.map(String::from),
            license_url: catalog.map(|_| "https://opensource.org/licenses/MIT".to_string()),
            valid,
        }
    }

    fn node(
        coordinate: &str,
        licenses: Vec<LicenseView>,
        children: Vec<HierarchyNodeView>,
    ) -> HierarchyNodeView {
        HierarchyNodeView {
            coordinate: coordinate.to_string(),
            scope: Some("compile".to_string()),
            optional: false,
            licenses,
            children,
        }
    }

    fn create_test_report() -> LicenseReport {
        LicenseReport {
            metadata: ReportMetadataView {
                timestamp: "2024-01-01T00:00:00Z".to_string(),
                tool_name: "license-audit".to_string(),
                tool_version: "0.1.0".to_string(),
                serial_number: "urn:uuid:1234".to_string(),
            },
            project: "com.example:app:1.0".to_string(),
            settings: RunSettings::new(true, false, false, false),
            direct_licenses: vec![
                license("MIT", Some("MIT"), true),
                license("GPL|3", None, false),
            ],
            transitive_licenses: vec![],
            hierarchy: HierarchyNodeView {
                coordinate: "com.example:app:1.0".to_string(),
                scope: None,
                optional: false,
                licenses: vec![],
                children: vec![
                    node(
                        "g:a:1",
                        vec![license("MIT", Some("MIT"), true)],
                        vec![node("g:c:1", vec![], vec![])],
                    ),
                    node("g:b:1", vec![license("GPL|3", None, false)], vec![]),
                ],
            },
            summary: ReportSummary {
                artifact_count: 3,
                invalid_count: 1,
                artifacts_without_results: vec!["g:c:1".to_string()],
            },
        }
    }

    #[test]
    fn test_sections_in_order() {
        let output = MarkdownFormatter::new().format(&create_test_report()).unwrap();

        let title = output.find("# Licenses Report").unwrap();
        let direct = output.find("## Directly Used Licenses").unwrap();
        let transitive = output.find("## Transitively Used Licenses").unwrap();
        let hierarchy = output.find("## Dependency Hierarchy").unwrap();
        assert!(title < direct && direct < transitive && transitive < hierarchy);
        assert!(output.contains("- **Project:** com.example:app:1.0"));
        assert!(output.contains("skipOptionals=false"));
    }

    #[test]
    fn test_license_table_rows() {
        let output = MarkdownFormatter::new().format(&create_test_report()).unwrap();

        assert!(output.contains(TABLE_HEADER));
        assert!(output.contains(
            "| MIT | [MIT](<https://opensource.org/licenses/MIT>) | valid |"
        ));
        assert!(output.contains("| GPL\\|3 |  | invalid |"));
        // empty transitive view
        assert!(output.contains("*No licenses*"));
    }

    #[test]
    fn test_hierarchy_nesting() {
        let output = MarkdownFormatter::new().format(&create_test_report()).unwrap();

        assert!(output.contains("- **g:a:1** (compile)\n"));
        assert!(output.contains(
            "  - *valid: MIT / [MIT](<https://opensource.org/licenses/MIT>)*\n"
        ));
        assert!(output.contains("  - **g:c:1** (compile)\n"));
        assert!(output.contains("  - *invalid: GPL|3*\n"));
    }

    #[test]
    fn test_summary_lists_artifacts_without_results() {
        let output = MarkdownFormatter::new().format(&create_test_report()).unwrap();
        assert!(output.contains("**3 artifacts audited, 1 invalid license finding.**"));
        assert!(output.contains("Artifacts without validation results:\n\n- g:c:1\n"));
    }

    #[test]
    fn test_empty_hierarchy() {
        let mut report = create_test_report();
        report.hierarchy.children.clear();
        let output = MarkdownFormatter::new().format(&report).unwrap();
        assert!(output.contains("*No dependencies*"));
    }
}
