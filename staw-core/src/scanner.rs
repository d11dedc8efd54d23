use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Suffix identifying markdown source files.
pub const DOCUMENT_SUFFIX: &str = ".md";

/// Stem of the per-directory landing document.
pub const LANDING_STEM: &str = "index";

/// File name every landing document is written to.
pub const LANDING_FILE: &str = "index.html";

#[derive(Debug, thiserror::Error)]
#[error("Failed to list {}", path.display())]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: walkdir::Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Document,
    Asset,
}

/// One immediate child of a source directory.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl SourceEntry {
    /// File name with the markdown suffix removed. Non-documents keep their full name.
    pub fn stem(&self) -> &str {
        match self.kind {
            EntryKind::Document => self
                .name
                .strip_suffix(DOCUMENT_SUFFIX)
                .unwrap_or(&self.name),
            _ => &self.name,
        }
    }

    pub fn is_landing(&self) -> bool {
        self.kind == EntryKind::Document && self.stem() == LANDING_STEM
    }
}

/// Lists the immediate children of `dir`, sorted by file name.
pub fn scan_dir(dir: &Path) -> Result<Vec<SourceEntry>, ScanError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ScanError {
            path: dir.to_path_buf(),
            source,
        })?;

        let name = entry.file_name().to_string_lossy().into_owned();
        let kind = if entry.file_type().is_dir() {
            EntryKind::Directory
        } else if is_document(&name) {
            EntryKind::Document
        } else {
            EntryKind::Asset
        };

        entries.push(SourceEntry {
            name,
            path: entry.into_path(),
            kind,
        });
    }

    Ok(entries)
}

pub fn is_document(name: &str) -> bool {
    name.ends_with(DOCUMENT_SUFFIX)
}
