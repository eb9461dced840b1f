//! Line codec for the files shared between the validate and report passes.
//!
//! Results file: an optional version header line, then one TAB-separated
//! record per outcome:
//!
//! ```text
//! #license-audit-results<TAB>1
//! group:name:version<TAB>scope<TAB>name<TAB>url<TAB>catalog name<TAB>catalog url<TAB>true|false
//! ```
//!
//! Backslash escapes (`\\`, `\t`, `\n`, `\r`) keep every record on one line;
//! `\:` escapes a colon inside a coordinate component.
//!
//! Settings file: `key=value` properties text.

use crate::audit::domain::{ArtifactCoordinate, KnownLicense, RunSettings, Scope, ValidationResult};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::borrow::Cow;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const RESULTS_HEADER_TAG: &str = "#license-audit-results";
pub const RESULTS_FORMAT_VERSION: u32 = 1;

const FIELD_COUNT: usize = 7;

const KEY_RECURSIVE: &str = "recursive";
const KEY_SKIP_TEST_SCOPE: &str = "skipTestScope";
const KEY_SKIP_PROVIDED_SCOPE: &str = "skipProvidedScope";
const KEY_SKIP_OPTIONALS: &str = "skipOptionals";

/// Writes the version header and records to any byte sink
pub struct ResultsWriter<W: Write> {
    inner: W,
}

impl<W: Write> ResultsWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_header(&mut self) -> std::io::Result<()> {
        writeln!(self.inner, "{}\t{}", RESULTS_HEADER_TAG, RESULTS_FORMAT_VERSION)
    }

    pub fn write_record(&mut self, result: &ValidationResult) -> std::io::Result<()> {
        let line = encode_record(result);
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Record-at-a-time reader over a results file.
///
/// `next_record` yields `Ok(None)` at end of input. Any malformed record is an
/// error; nothing is skipped.
pub struct ResultsReader<R: BufRead> {
    inner: R,
    path: PathBuf,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> ResultsReader<R> {
    /// `path` is only used for error messages
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            line: 0,
            buf: Vec::new(),
        }
    }

    pub fn next_record(&mut self) -> Result<Option<ValidationResult>> {
        loop {
            self.buf.clear();
            let read = self
                .inner
                .read_until(b'\n', &mut self.buf)
                .map_err(|e| AuditError::Persistence {
                    path: self.path.clone(),
                    details: format!("read failed after line {}: {}", self.line, e),
                })?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = decode_line(&self.buf);
            if text.is_empty() {
                continue;
            }

            if self.line == 1 && text.starts_with(RESULTS_HEADER_TAG) {
                self.check_header(&text)?;
                continue;
            }

            return decode_record(&text)
                .map(Some)
                .map_err(|details| self.malformed(details));
        }
    }

    fn check_header(&self, text: &str) -> Result<()> {
        let found = text[RESULTS_HEADER_TAG.len()..].trim_start_matches('\t').trim();
        if found == RESULTS_FORMAT_VERSION.to_string() {
            return Ok(());
        }
        Err(AuditError::UnsupportedFormatVersion {
            path: self.path.clone(),
            found: found.to_string(),
            supported: RESULTS_FORMAT_VERSION,
        }
        .into())
    }

    fn malformed(&self, details: String) -> anyhow::Error {
        AuditError::MalformedRecord {
            path: self.path.clone(),
            line: self.line,
            details,
        }
        .into()
    }
}

impl<R: BufRead> Iterator for ResultsReader<R> {
    type Item = Result<ValidationResult>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Strips the line terminator (LF or CRLF) and decodes lossily
fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes)
}

pub fn encode_record(result: &ValidationResult) -> String {
    let coordinate = result.artifact();
    let coordinate = format!(
        "{}:{}:{}",
        escape(coordinate.group(), true),
        escape(coordinate.name(), true),
        escape(coordinate.version(), true)
    );
    let (catalog_name, catalog_url) = match result.license() {
        Some(license) => (license.name(), license.url().unwrap_or("")),
        None => ("", ""),
    };

    [
        coordinate,
        result.scope().as_str().to_string(),
        escape(result.original_license_name(), false),
        escape(result.original_license_url().unwrap_or(""), false),
        escape(catalog_name, false),
        escape(catalog_url, false),
        result.is_valid().to_string(),
    ]
    .join("\t")
}

pub fn decode_record(line: &str) -> std::result::Result<ValidationResult, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        ));
    }

    let components = split_escaped(fields[0], ':')?;
    let [group, name, version]: [String; 3] = components
        .try_into()
        .map_err(|parts: Vec<String>| {
            format!("coordinate has {} components, expected 3", parts.len())
        })?;
    let coordinate = ArtifactCoordinate::new(group, name, version)
        .map_err(|e| format!("invalid coordinate: {}", e))?;

    let scope: Scope = fields[1].parse()?;
    let original_name = unescape(fields[2], false)?;
    let original_url = non_empty(unescape(fields[3], false)?);
    let catalog_name = non_empty(unescape(fields[4], false)?);
    let catalog_url = non_empty(unescape(fields[5], false)?);

    let license = match (catalog_name, catalog_url) {
        (Some(name), url) => Some(KnownLicense::new(name, url)),
        (None, None) => None,
        (None, Some(_)) => return Err("catalog URL without catalog name".to_string()),
    };

    let valid = match fields[6] {
        "true" => true,
        "false" => false,
        other => return Err(format!("invalid valid flag '{}'", other)),
    };

    Ok(ValidationResult::new(
        coordinate,
        scope,
        original_name,
        original_url,
        license,
        valid,
    ))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn escape(value: &str, coordinate_component: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' if coordinate_component => out.push_str("\\:"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(value: &str, coordinate_component: bool) -> std::result::Result<String, String> {
    let mut parts = split_escaped_inner(value, None, coordinate_component)?;
    Ok(parts.pop().unwrap_or_default())
}

/// Splits on every unescaped `separator`, unescaping each part
fn split_escaped(value: &str, separator: char) -> std::result::Result<Vec<String>, String> {
    split_escaped_inner(value, Some(separator), true)
}

fn split_escaped_inner(
    value: &str,
    separator: Option<char>,
    colon_escape: bool,
) -> std::result::Result<Vec<String>, String> {
    let mut parts = Vec::new();
    let mut current = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('\\') => current.push('\\'),
                Some('t') => current.push('\t'),
                Some('n') => current.push('\n'),
                Some('r') => current.push('\r'),
                Some(':') if colon_escape => current.push(':'),
                Some(other) => return Err(format!("unknown escape sequence '\\{}'", other)),
                None => return Err("dangling escape at end of field".to_string()),
            }
        } else if Some(c) == separator {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    Ok(parts)
}

/// Renders the settings file; all four keys are always written
pub fn encode_settings(settings: &RunSettings) -> String {
    format!(
        "# license-audit run settings\n{}={}\n{}={}\n{}={}\n{}={}\n",
        KEY_RECURSIVE,
        settings.recursive,
        KEY_SKIP_TEST_SCOPE,
        settings.skip_test_scope,
        KEY_SKIP_PROVIDED_SCOPE,
        settings.skip_provided_scope,
        KEY_SKIP_OPTIONALS,
        settings.skip_optionals
    )
}

/// Parses the settings file. Absent keys default to `true`; unknown keys are ignored.
pub fn decode_settings(content: &str, path: &Path) -> Result<RunSettings> {
    let mut settings = RunSettings::default();

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let Some(split_at) = line.find(['=', ':']) else {
            return Err(settings_error(path, format!("line '{}' has no value", line)));
        };
        let key = line[..split_at].trim();
        let value = line[split_at + 1..].trim();

        let target = match key {
            KEY_RECURSIVE => &mut settings.recursive,
            KEY_SKIP_TEST_SCOPE => &mut settings.skip_test_scope,
            KEY_SKIP_PROVIDED_SCOPE => &mut settings.skip_provided_scope,
            KEY_SKIP_OPTIONALS => &mut settings.skip_optionals,
            _ => continue,
        };
        *target = parse_bool(value)
            .ok_or_else(|| settings_error(path, format!("'{}' is not a boolean: '{}'", key, value)))?;
    }

    Ok(settings)
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn settings_error(path: &Path, details: String) -> anyhow::Error {
    AuditError::Persistence {
        path: path.to_path_buf(),
        details,
    }
    .into()
}
