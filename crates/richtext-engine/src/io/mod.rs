use crate::models::Document;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Read a document stored as structural JSON
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Document::from_json(&content).map_err(|source| IoError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document as pretty-printed JSON, creating parent directories
pub fn write_document(path: &Path, document: &Document) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut content = document.to_json_pretty().map_err(IoError::Encode)?;
    content.push('\n');
    fs::write(path, content)?;
    log::debug!("wrote {} blocks to {}", document.len(), path.display());
    Ok(())
}
