use super::results_codec::{encode_settings, decode_settings, ResultsReader, ResultsWriter};
use crate::audit::domain::{ArtifactCoordinate, RunSettings, ValidationResult};
use crate::ports::outbound::ResultsStore;
use crate::shared::error::AuditError;
use crate::shared::security::{read_regular_file, validate_not_symlink, validate_regular_file};
use crate::shared::Result;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub const SETTINGS_FILE_NAME: &str = "settings.properties";
pub const RESULTS_FILE_NAME: &str = "validation-results.tsv";

/// FileSystemResultsStore adapter keeping the validate-pass state in a directory
///
/// Both files are staged completely before either is replaced, and each is
/// replaced atomically: a reader never observes a half-written file, nor
/// settings from one run next to results from another.
pub struct FileSystemResultsStore {
    dir: PathBuf,
}

impl FileSystemResultsStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }

    pub fn results_path(&self) -> PathBuf {
        self.dir.join(RESULTS_FILE_NAME)
    }

    fn prepare_dir(&self) -> Result<()> {
        if self.dir.exists() {
            validate_not_symlink(&self.dir, "write")?;
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(|e| {
            AuditError::Persistence {
                path: self.dir.clone(),
                details: format!("cannot create results directory: {}", e),
            }
            .into()
        })
    }

    /// Fills and syncs a temp file in the results directory, destined for
    /// `target`. Dropping the returned file removes it.
    fn stage<F>(&self, target: &Path, fill: F) -> Result<NamedTempFile>
    where
        F: FnOnce(&mut BufWriter<&File>) -> std::io::Result<()>,
    {
        if target.exists() {
            validate_not_symlink(target, "write")?;
        }
        let persistence = |details: String| AuditError::Persistence {
            path: target.to_path_buf(),
            details,
        };

        let temp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| persistence(format!("cannot create temp file: {}", e)))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            fill(&mut writer)
                .and_then(|_| writer.flush())
                .map_err(|e| persistence(format!("cannot write: {}", e)))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| persistence(format!("cannot sync: {}", e)))?;
        Ok(temp)
    }

    /// Renames a staged file over `target`
    fn commit(temp: NamedTempFile, target: &Path) -> Result<()> {
        temp.persist(target).map_err(|e| AuditError::Persistence {
            path: target.to_path_buf(),
            details: format!("cannot replace file: {}", e.error),
        })?;
        Ok(())
    }

    fn remove_settings(&self) -> Result<()> {
        let path = self.settings_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuditError::Persistence {
                path,
                details: format!("cannot remove previous settings: {}", e),
            }
            .into()),
        }
    }
}

impl ResultsStore for FileSystemResultsStore {
    fn ensure_available(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(AuditError::Configuration {
                message: format!("results directory {} does not exist", self.dir.display()),
                hint: "Run the validate pass first, or point --results-dir at its output"
                    .to_string(),
            }
            .into());
        }
        for path in [self.settings_path(), self.results_path()] {
            if !path.is_file() {
                return Err(AuditError::Configuration {
                    message: format!("{} is missing", path.display()),
                    hint: "Re-run the validate pass to regenerate the results directory"
                        .to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn write(&self, settings: &RunSettings, results: &[ValidationResult]) -> Result<()> {
        self.prepare_dir()?;

        // Settings are the commit marker: removed before the results are
        // replaced and written last, so a failed write never pairs one run's
        // settings with another run's results.
        let settings_text = encode_settings(settings);
        let staged_settings = self.stage(&self.settings_path(), |w| {
            w.write_all(settings_text.as_bytes())
        })?;
        let staged_results = self.stage(&self.results_path(), |w| {
            let mut writer = ResultsWriter::new(w);
            writer.write_header()?;
            for result in results {
                writer.write_record(result)?;
            }
            Ok(())
        })?;

        self.remove_settings()?;
        Self::commit(staged_results, &self.results_path())?;
        Self::commit(staged_settings, &self.settings_path())?;

        debug!(
            "Wrote {} validation result(s) to {}",
            results.len(),
            self.results_path().display()
        );
        Ok(())
    }

    fn read_settings(&self) -> Result<RunSettings> {
        let path = self.settings_path();
        let content = read_regular_file(&path, "Settings file")?;
        decode_settings(&content, &path)
    }

    fn read_results(&self) -> Result<Vec<ValidationResult>> {
        let path = self.results_path();
        validate_regular_file(&path, "Results file")?;
        let file = File::open(&path).map_err(|e| AuditError::Persistence {
            path: path.clone(),
            details: e.to_string(),
        })?;

        let mut reader = ResultsReader::new(BufReader::new(file), path.clone());
        let mut seen: HashSet<(ArtifactCoordinate, String)> = HashSet::new();
        let mut results = Vec::new();
        while let Some(result) = reader.next_record()? {
            let key = (
                result.artifact().clone(),
                result.original_license_name().to_string(),
            );
            if seen.insert(key) {
                results.push(result);
            }
        }

        debug!(
            "Read {} validation result(s) from {}",
            results.len(),
            path.display()
        );
        Ok(results)
    }
}
