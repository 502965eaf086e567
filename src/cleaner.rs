use crate::error::{CleanError, TagError};
use crate::file_utils;
use crate::logger::{BatchSummary, ReportConfig, Reporter};
use crate::metadata::Id3Backend;
use crate::tags::{self, TagAccess, TagBackend, DATE_KEY};
use std::path::Path;

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The date field was present and has been removed on disk.
    Removed,
    /// No date field; nothing was written beyond a possible header initialization.
    Skipped,
    Failed(TagError),
}

/// Strips the year/date field from MP3 files, one at a time or per directory.
pub struct TagCleaner<B: TagBackend = Id3Backend> {
    backend: B,
    reporter: Reporter,
}

impl TagCleaner<Id3Backend> {
    pub fn new(verbose: bool) -> Self {
        Self::with_backend(
            Id3Backend,
            Reporter::new(ReportConfig {
                verbose,
                ..ReportConfig::default()
            }),
        )
    }
}

impl Default for TagCleaner<Id3Backend> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<B: TagBackend> TagCleaner<B> {
    pub fn with_backend(backend: B, reporter: Reporter) -> Self {
        Self { backend, reporter }
    }

    pub fn verbose(&self) -> bool {
        self.reporter.config().verbose
    }

    /// Remove the date field from `path` without reporting.
    pub fn process_file(&self, path: &Path) -> FileOutcome {
        match self.strip_date(path) {
            Ok(true) => FileOutcome::Removed,
            Ok(false) => FileOutcome::Skipped,
            Err(e) => FileOutcome::Failed(e),
        }
    }

    fn strip_date(&self, path: &Path) -> Result<bool, TagError> {
        let mut tags = tags::load_tags(&self.backend, path)?;
        if !tags.contains_key(DATE_KEY) {
            return Ok(false);
        }
        // nothing to write if the backend could not actually drop the field
        let removed = tags.delete_key(DATE_KEY);
        if removed {
            tags.persist()?;
        }
        Ok(removed)
    }

    /// Clean a single file and report the outcome. Failures are reported, never returned.
    pub fn clean_file(&self, path: &Path) {
        let outcome = self.process_file(path);
        self.report(path, &outcome);
    }

    /// Clean every `.mp3` entry directly inside `dir`.
    ///
    /// Only a failure to list `dir` is returned; per-file failures are reported
    /// and the batch carries on.
    pub fn clean_directory(&self, dir: &Path) -> Result<(), CleanError> {
        let entries =
            file_utils::list_mp3_entries(dir).map_err(|source| CleanError::ListDirectory {
                path: dir.to_path_buf(),
                source,
            })?;

        let mut summary = BatchSummary::default();
        for path in &entries {
            let outcome = self.process_file(path);
            match outcome {
                FileOutcome::Removed => summary.removed += 1,
                FileOutcome::Skipped => summary.skipped += 1,
                FileOutcome::Failed(_) => summary.failed += 1,
            }
            self.report(path, &outcome);
        }

        self.reporter.summary(&summary);
        Ok(())
    }

    fn report(&self, path: &Path, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Removed => self.reporter.removed(path),
            FileOutcome::Skipped => self.reporter.skipped(path),
            FileOutcome::Failed(e) => self.reporter.error(path, e),
        }
    }
}
