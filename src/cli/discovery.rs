//! Pipeline file discovery

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions recognized as pipeline documents
pub const PIPELINE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// A path that was given or found but cannot be run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of expanding command-line paths into pipeline files
#[derive(Debug, Default)]
pub struct Discovery {
    /// Pipeline files, in execution order
    pub files: Vec<PathBuf>,

    pub skipped: Vec<SkippedPath>,
}

impl Discovery {
    fn skip(&mut self, path: &Path, reason: impl Into<String>) {
        self.skipped.push(SkippedPath {
            path: path.to_path_buf(),
            reason: reason.into(),
        });
    }
}

/// Whether a path carries a pipeline extension
pub fn is_pipeline_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PIPELINE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Expand files and directories into the list of pipeline files to run
///
/// Arguments keep their command-line order. Each directory is walked
/// recursively and contributes its files sorted by path; hidden
/// subdirectories are not entered. A file reached twice runs once.
pub fn discover<P: AsRef<Path>>(paths: &[P]) -> Discovery {
    let mut discovery = Discovery::default();
    let mut seen = HashSet::new();

    for path in paths {
        let path = path.as_ref();
        let mut found = Vec::new();

        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {
                walk(path, &mut found, &mut discovery);
                found.sort();
            }
            Ok(_) if is_pipeline_file(path) => found.push(path.to_path_buf()),
            Ok(_) => discovery.skip(path, "not a .yaml, .yml or .json file"),
            Err(e) => discovery.skip(path, e.to_string()),
        }

        for file in found {
            if seen.insert(file.clone()) {
                discovery.files.push(file);
            }
        }
    }

    debug!(
        "Discovered {} pipeline file(s), skipped {}",
        discovery.files.len(),
        discovery.skipped.len()
    );
    discovery
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>, discovery: &mut Discovery) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            discovery.skip(dir, e.to_string());
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                discovery.skip(dir, e.to_string());
                continue;
            }
        };

        let path = entry.path();
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => {
                if !is_hidden(&path) {
                    walk(&path, found, discovery);
                }
            }
            Ok(_) => {
                if is_pipeline_file(&path) {
                    found.push(path);
                }
            }
            Err(e) => discovery.skip(&path, e.to_string()),
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
