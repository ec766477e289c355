//! Reading entries from record text and directories of record files.
//!
//! A record is one line, `name,date[,year]`. Blank lines and lines starting
//! with `#` are ignored. Records that are malformed or whose date does not
//! parse are dropped and logged; they never fail a load.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::Entry;
use crate::error::{LoadError, ParseError};
use crate::parser::parse_rule;

/// One unparsed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub name: String,
    pub date_token: String,
    pub year_token: Option<String>,
    pub source: Option<String>,
}

/// Split a record line into its fields.
///
/// Returns `None` for blank lines, comments, lines with fewer than two
/// fields, and lines with an empty name. Fields past the third are ignored.
pub fn parse_line(line: &str, source: Option<&str>) -> Option<RawRecord> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields = line.split(',').map(str::trim);
    let name = fields.next().filter(|n| !n.is_empty())?;
    let date_token = fields.next()?;
    let year_token = fields.next().filter(|y| !y.is_empty());

    Some(RawRecord {
        name: name.to_string(),
        date_token: date_token.to_string(),
        year_token: year_token.map(str::to_string),
        source: source.map(str::to_string),
    })
}

impl Entry {
    /// Parse a raw record's date into an entry, keeping its source.
    pub fn from_record(record: &RawRecord) -> Result<Entry, ParseError> {
        let rule = parse_rule(&record.date_token, record.year_token.as_deref())?;
        let entry = Entry::new(record.name.clone(), rule);
        Ok(match &record.source {
            Some(source) => entry.with_source(source.clone()),
            None => entry,
        })
    }
}

/// Every well-formed entry in `text`, in line order.
pub fn entries_from_str(text: &str, source: Option<&str>) -> Vec<Entry> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let Some(record) = parse_line(line, source) else {
            if is_content(line) {
                tracing::debug!(line = index + 1, source, "Skipping malformed record");
            }
            continue;
        };
        match Entry::from_record(&record) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::debug!(
                    line = index + 1,
                    source,
                    name = %record.name,
                    error = %e,
                    "Skipping record with invalid date"
                );
            }
        }
    }
    entries
}

fn is_content(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

/// How [`Loader`] walks the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoaderConfig {
    /// File extension (without the dot) of record files.
    pub extension: String,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Ignore files and directories whose name starts with `.`.
    pub skip_hidden: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extension: "csv".to_string(),
            recursive: true,
            skip_hidden: true,
        }
    }
}

impl LoaderConfig {
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn skip_hidden(mut self, skip_hidden: bool) -> Self {
        self.skip_hidden = skip_hidden;
        self
    }
}

/// Loads entries from record files on disk.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read one record file. Entries are tagged with the file's path.
    pub fn load_file(&self, path: &Path) -> Result<Vec<Entry>, LoadError> {
        let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let source = path.display().to_string();
        let entries = entries_from_str(&text, Some(&source));
        tracing::debug!(path = %path.display(), count = entries.len(), "Loaded record file");
        Ok(entries)
    }

    /// Read every record file under `root`, in path order.
    ///
    /// Fails only if `root` itself cannot be read. Files and subdirectories
    /// that cannot be read are logged and skipped. Symlinked directories are
    /// not followed; symlinked files are read.
    pub fn load_dir(&self, root: &Path) -> Result<Vec<Entry>, LoadError> {
        let mut files = Vec::new();
        let listing = fs::read_dir(root).map_err(|e| LoadError::io(root, e))?;
        self.collect_files(listing, &mut files);
        files.sort();

        let mut entries = Vec::new();
        for file in &files {
            match self.load_file(file) {
                Ok(found) => entries.extend(found),
                Err(e) => {
                    tracing::warn!(path = %file.display(), error = %e, "Could not read record file");
                }
            }
        }
        tracing::info!(
            root = %root.display(),
            files = files.len(),
            entries = entries.len(),
            "Loaded entries"
        );
        Ok(entries)
    }

    fn collect_files(&self, listing: fs::ReadDir, files: &mut Vec<PathBuf>) {
        for dir_entry in listing.flatten() {
            let path = dir_entry.path();
            // file_type() does not follow symlinks
            let Ok(file_type) = dir_entry.file_type() else {
                continue;
            };
            let hidden = path
                .file_name()
                .and_then(OsStr::to_str)
                .is_some_and(|n| n.starts_with('.'));
            if hidden && self.config.skip_hidden {
                continue;
            }

            if file_type.is_symlink() && path.is_dir() {
                tracing::debug!(dir = %path.display(), "Not following symlinked directory");
                continue;
            }

            if file_type.is_dir() {
                if !self.config.recursive {
                    continue;
                }
                match fs::read_dir(&path) {
                    Ok(sub) => self.collect_files(sub, files),
                    Err(e) => {
                        tracing::warn!(dir = %path.display(), error = %e, "Could not read directory");
                    }
                }
                continue;
            }

            if path.extension().and_then(OsStr::to_str) == Some(self.config.extension.as_str()) {
                files.push(path);
            }
        }
    }
}
