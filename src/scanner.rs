use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// How a source file's content is turned into page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Saved page; markup is stripped first
    Html,
    /// Already plain text
    Text,
}

impl SourceKind {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" => Some(Self::Html),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// A local page discovered under the input path.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl SourceFile {
    /// Read the file and return its page text.
    ///
    /// `force_html` strips markup from `.txt` files too.
    pub fn read_text(&self, force_html: bool) -> io::Result<String> {
        let content = fs::read_to_string(&self.path)?;
        Ok(match self.kind {
            SourceKind::Html => name_pair_types::html_to_text(&content),
            SourceKind::Text if force_html => name_pair_types::html_to_text(&content),
            SourceKind::Text => content,
        })
    }
}

/// Discover input pages under `root`.
///
/// A file is taken as-is (unknown extensions count as text). A directory is
/// walked recursively for `.txt`, `.html` and `.htm`, sorted by path so runs
/// are reproducible.
pub fn scan_sources(root: &Path) -> Vec<SourceFile> {
    if root.is_file() {
        return vec![SourceFile {
            path: root.to_path_buf(),
            kind: SourceKind::from_path(root).unwrap_or(SourceKind::Text),
        }];
    }

    let mut results: Vec<SourceFile> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| !is_hidden(e.path()))
        .filter_map(|e| {
            let path = e.path().to_path_buf();
            let kind = SourceKind::from_path(&path)?;
            Some(SourceFile { path, kind })
        })
        .collect();

    results.sort_by(|a, b| a.path.cmp(&b.path));
    results
}

/// Skip dotfiles such as editor swap files.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
