// Feature file loading for sigfeat
// Reads declaration files line by line; walks directories with walkdir

use super::declaration::parse_declaration;
use crate::error::{FeatureError, Result};
use crate::models::Feature;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_EXTENSION: &str = "feat";

/// Parser behaviour switches
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Return the first bad line as an error instead of skipping it
    pub strict: bool,
    /// File extension picked up by `parse_dir`
    pub extension: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            strict: false,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// A skipped declaration line and the reason it was skipped
#[derive(Debug)]
pub struct LineDiagnostic {
    pub source: Option<PathBuf>,
    pub line_number: usize,
    pub line: String,
    pub error: FeatureError,
}

/// Accumulates features from declaration text, files and directories.
///
/// Bad lines never abort a file: they are logged, recorded in
/// `diagnostics()` and skipped, unless `strict` is set.
#[derive(Debug, Default)]
pub struct FeatureParser {
    options: ParserOptions,
    features: Vec<Feature>,
    diagnostics: Vec<LineDiagnostic>,
}

impl FeatureParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Build a parser and load one file into it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut parser = Self::new();
        parser.parse_file(path)?;
        Ok(parser)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }

    pub fn diagnostics(&self) -> &[LineDiagnostic] {
        &self.diagnostics
    }

    /// Parse one line and append its feature.
    ///
    /// Returns `Ok(false)` for blank and comment lines.
    pub fn parse_line(&mut self, line: &str) -> Result<bool> {
        match parse_declaration(line)? {
            Some(feature) => {
                debug!("Parsed {} feature '{}'", feature.kind(), feature.name());
                self.features.push(feature);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Parse declaration text, returning the number of features appended
    pub fn parse_str(&mut self, text: &str) -> Result<usize> {
        self.ingest(text, None)
    }

    /// Parse a UTF-8 declaration file, returning the number of features appended
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| FeatureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let added = self.ingest(&text, Some(path))?;
        info!("Loaded {} features from {}", added, path.display());
        Ok(added)
    }

    /// Parse every file with the configured extension under `dir`, in path order.
    ///
    /// Symlinks are followed. Entries that cannot be read are logged and skipped.
    pub fn parse_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(FeatureError::Io {
                path: dir.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            });
        }

        let mut added = 0;
        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };
            let matches_ext = entry
                .path()
                .extension()
                .map_or(false, |ext| ext == self.options.extension.as_str());
            if entry.file_type().is_file() && matches_ext {
                added += self.parse_file(entry.path())?;
            }
        }
        Ok(added)
    }

    fn ingest(&mut self, text: &str, source: Option<&Path>) -> Result<usize> {
        let mut added = 0;
        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            match self.parse_line(line) {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(error) if self.options.strict => {
                    return Err(FeatureError::Line {
                        line: line_number,
                        source: Box::new(error),
                    });
                }
                Err(error) => {
                    warn!(
                        "Skipping line {}{}: {} ({})",
                        line_number,
                        source.map(|p| format!(" of {}", p.display())).unwrap_or_default(),
                        error,
                        line.trim()
                    );
                    self.diagnostics.push(LineDiagnostic {
                        source: source.map(Path::to_path_buf),
                        line_number,
                        line: line.to_string(),
                        error,
                    });
                }
            }
        }
        Ok(added)
    }
}
