use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

/// Supplies the ordered set of named documents that make up the knowledge base.
pub trait DocumentSource {
    fn documents(&self) -> Result<Vec<Document>, AppError>;
}

/// Reads every `*.md` file of a folder, ordered by file name.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for DirectorySource {
    fn documents(&self) -> Result<Vec<Document>, AppError> {
        if !self.root.is_dir() {
            return Err(AppError::new(
                "CORPUS_SOURCE_MISSING",
                "Documents folder not found",
            )
            .with_details(format!("path={}", self.root.display())));
        }

        let entries = fs::read_dir(&self.root).map_err(|e| {
            AppError::new("CORPUS_READ_FAILED", "Failed to list documents folder")
                .with_details(format!("path={}; err={}", self.root.display(), e))
        })?;

        let paths = markdown_paths(&self.root, entries.map(|e| e.map(|ent| ent.path())))?;

        let mut out = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path).map_err(|e| {
                AppError::new("CORPUS_READ_FAILED", "Failed to read document")
                    .with_details(format!("path={}; err={}", path.display(), e))
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            out.push(Document { name, text });
        }
        Ok(out)
    }
}

/// Sorted `*.md` files among listed entries. A failed entry fails the listing.
fn markdown_paths(
    root: &Path,
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
) -> Result<Vec<PathBuf>, AppError> {
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            AppError::new("CORPUS_READ_FAILED", "Failed to list documents folder")
                .with_details(format!("path={}; err={}", root.display(), e))
        })?;
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Fixed documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    docs: Vec<Document>,
}

impl InMemorySource {
    pub fn with_document(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.docs.push(Document {
            name: name.into(),
            text: text.into(),
        });
        self
    }
}

impl DocumentSource for InMemorySource {
    fn documents(&self) -> Result<Vec<Document>, AppError> {
        Ok(self.docs.clone())
    }
}

/// Concatenate all documents into one corpus string, each under a
/// `# <name>` header and separated by a horizontal rule.
pub fn assemble_corpus(source: &dyn DocumentSource) -> Result<String, AppError> {
    let docs = source.documents()?;
    if docs.is_empty() {
        return Err(AppError::new("CORPUS_EMPTY", "No documents found"));
    }

    let parts: Vec<String> = docs
        .iter()
        .map(|d| format!("# {}\n{}", d.name, d.text))
        .collect();
    let corpus = parts.join(DOCUMENT_SEPARATOR);

    tracing::debug!(documents = docs.len(), chars = corpus.chars().count(), "assembled corpus");
    Ok(corpus)
}
