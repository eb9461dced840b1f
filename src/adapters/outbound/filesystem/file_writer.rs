use crate::ports::outbound::OutputPresenter;
use crate::shared::error::AuditError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// FileSystemWriter adapter for writing the rendered report to a file
///
/// Missing parent directories are created. An existing symlink at the
/// destination is refused.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn prepare_parent_directory(&self) -> Result<()> {
        let Some(parent) = self.output_path.parent() else {
            return Ok(());
        };
        if parent == Path::new("") || parent.exists() {
            return Ok(());
        }
        fs::create_dir_all(parent).map_err(|e| {
            AuditError::FileWriteError {
                path: self.output_path.clone(),
                details: format!("Cannot create directory {}: {}", parent.display(), e),
            }
            .into()
        })
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.prepare_parent_directory()?;
        if self.output_path.exists() {
            validate_not_symlink(&self.output_path, "write")?;
        }

        fs::write(&self.output_path, content).map_err(|e| AuditError::FileWriteError {
            path: self.output_path.clone(),
            details: e.to_string(),
        })?;

        info!("Report written to {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing the rendered report to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("dependency-licenses-report.md");

        let writer = FileSystemWriter::new(output_path.clone());
        writer.present("# Licenses Report\n").unwrap();

        let written = fs::read_to_string(&output_path).unwrap();
        assert_eq!(written, "# Licenses Report\n");
    }

    #[test]
    fn test_file_writer_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("target/licenses/report.json");

        FileSystemWriter::new(output_path.clone())
            .present("{}")
            .unwrap();
        assert!(output_path.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_writer_refuses_symlink_destination() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real.md");
        fs::write(&real, "original").unwrap();
        let link = temp_dir.path().join("report.md");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let result = FileSystemWriter::new(link).present("replaced");
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&real).unwrap(), "original");
    }

    #[test]
    fn test_stdout_presenter_success() {
        let presenter = StdoutPresenter::new();
        assert!(presenter.present("report\n").is_ok());
    }
}
