use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::ide::AnalysisHost;
use crate::syntax::{Parse, parse};

/// Source extension picked up by default.
pub const HAXE_EXTENSION: &str = "hx";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("directory not found: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of loading a directory. Unreadable files and directory entries
/// the walk cannot follow are reported here and do not abort the load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub errors: Vec<LoadError>,
}

/// Loads workspace sources into an [`AnalysisHost`].
#[derive(Debug, Clone)]
pub struct WorkspaceLoader {
    extension: String,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self {
            extension: HAXE_EXTENSION.to_owned(),
        }
    }

    /// Load files with another extension instead of `.hx`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Loads every matching file under `dir`, parsing them in parallel.
    pub fn load_directory_into_host(
        &self,
        dir: impl AsRef<Path>,
        host: &mut AnalysisHost,
    ) -> Result<LoadReport, LoadError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(LoadError::NotADirectory(dir.to_owned()));
        }

        let mut report = LoadReport::default();
        let paths = self.collect_file_paths(dir, &mut report.errors);
        let results: Vec<_> = paths.par_iter().map(|path| read_and_parse(path)).collect();

        for (path, result) in paths.into_iter().zip(results) {
            match result {
                Ok((text, parsed)) => {
                    host.set_parsed(&path, text, parsed);
                    report.loaded += 1;
                }
                Err(err) => report.errors.push(err),
            }
        }

        tracing::debug!(
            dir = %dir.display(),
            loaded = report.loaded,
            failed = report.errors.len(),
            "workspace loaded"
        );
        Ok(report)
    }

    /// Loads a single file.
    pub fn load_file_into_host(
        &self,
        path: impl AsRef<Path>,
        host: &mut AnalysisHost,
    ) -> Result<(), LoadError> {
        let path = path.as_ref();
        let (text, parsed) = read_and_parse(path)?;
        host.set_parsed(path, text, parsed);
        Ok(())
    }

    /// Matching files under `dir`, sorted so file ids are assigned
    /// deterministically. Symlinks are followed; entries that cannot be
    /// visited go to `errors`.
    fn collect_file_paths(&self, dir: &Path, errors: &mut Vec<LoadError>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source.path().map_or_else(|| dir.to_owned(), Path::to_owned);
                    tracing::debug!(path = %path.display(), error = %source, "skipping entry");
                    errors.push(LoadError::Walk { path, source });
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == self.extension.as_str())
            {
                paths.push(path.to_owned());
            }
        }
        paths.sort();
        paths
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_and_parse(path: &Path) -> Result<(String, Parse), LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let parsed = parse(&text);
    if !parsed.errors().is_empty() {
        tracing::trace!(path = %path.display(), errors = parsed.errors().len(), "parsed with errors");
    }
    Ok((text, parsed))
}
