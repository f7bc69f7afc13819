//! Validated description of one watched directory.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ExporterError, Result};

/// One directory to watch, as loaded from configuration.
///
/// Immutable once built; the scheduler owns the list and lends each spec to
/// the scanner by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSpec {
    directory_path: PathBuf,
    directory_name: String,
    extensions_to_watch: BTreeSet<String>,
    recurse: bool,
}

impl MonitorSpec {
    /// Build a spec, normalizing every extension (lower case, leading `.`).
    pub fn new<P, N, I, S>(directory_path: P, directory_name: N, extensions: I, recurse: bool) -> Result<Self>
    where
        P: Into<PathBuf>,
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let directory_path = directory_path.into();
        if directory_path.as_os_str().is_empty() {
            return Err(ExporterError::config("directory_path must not be empty"));
        }

        let extensions_to_watch = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect::<Result<BTreeSet<_>>>()?;

        Ok(Self {
            directory_path,
            directory_name: directory_name.into(),
            extensions_to_watch,
            recurse,
        })
    }

    pub fn directory_path(&self) -> &Path {
        &self.directory_path
    }

    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    pub fn extensions_to_watch(&self) -> &BTreeSet<String> {
        &self.extensions_to_watch
    }

    pub fn recurse(&self) -> bool {
        self.recurse
    }

    /// Value of the `path` label.
    pub fn path_label(&self) -> String {
        self.directory_path.to_string_lossy().into_owned()
    }

    pub fn watches(&self, extension: &str) -> bool {
        self.extensions_to_watch.contains(extension)
    }
}

impl fmt::Display for MonitorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extensions: Vec<&str> = self.extensions_to_watch.iter().map(String::as_str).collect();
        write!(
            f,
            "{} ({}) extensions=[{}] recurse={}",
            self.directory_name,
            self.directory_path.display(),
            extensions.join(", "),
            self.recurse
        )
    }
}

/// Normalize a configured extension to the form the scanner produces.
///
/// `"LOG"`, `".Log"` and `" .log "` all become `".log"`.
pub fn normalize_extension(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);

    if bare.is_empty() {
        return Err(ExporterError::config(format!(
            "invalid extension {:?}: must contain at least one character after '.'",
            raw
        )));
    }
    if bare.contains(['/', '\\']) {
        return Err(ExporterError::config(format!(
            "invalid extension {:?}: must not contain path separators",
            raw
        )));
    }

    Ok(format!(".{}", bare.to_lowercase()))
}

/// Extension of a file name as the scanner sees it, if any.
///
/// Dot-files such as `.bashrc` have no extension; `archive.tar.GZ` yields `.gz`.
pub fn file_extension(file_name: &Path) -> Option<String> {
    file_name
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}
